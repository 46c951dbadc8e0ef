pub mod pkce;
pub mod supabase_client;
