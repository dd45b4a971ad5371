/// Why a submission body cannot become a [`crate::ContactRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One of name, email, message or token is absent or empty.
    Missing(&'static str),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "missing input: {field}"),
        }
    }
}

impl std::error::Error for InputError {}
