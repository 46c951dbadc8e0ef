pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

/// A redirect decided by a pipeline operation. The HTTP boundary turns it into
/// the actual response; the pipelines never touch the web framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTo {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RedirectTo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn home() -> Self {
        Self::new(HOME_PATH)
    }

    pub fn login() -> Self {
        Self::new(LOGIN_PATH)
    }

    pub fn signup() -> Self {
        Self::new(SIGNUP_PATH)
    }

    /// Absolute URL handed back by a third party, used verbatim.
    pub fn external(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.with_query("error", message)
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.with_query("message", message)
    }

    /// Value for the `Location` header, query values percent-encoded.
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<String>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }
}
