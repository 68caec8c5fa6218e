/// Classification of a fatal run failure.
///
/// Per-record soft conditions (no postcode, no locality) are not errors and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    InputUnparseable,
    MissingColumns(Vec<String>),
    Reference,
    Output,
}

impl ErrorKind {
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::InputNotFound | ErrorKind::InputUnparseable | ErrorKind::MissingColumns(_) => 2,
            ErrorKind::Reference => 3,
            ErrorKind::Output => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input_not_found(path: &std::path::Path) -> Self {
        Self::new(
            ErrorKind::InputNotFound,
            format!(
                "ERROR: The file '{}' was not found. Please check the file name and location.",
                path.display()
            ),
        )
    }

    pub fn input_unparseable(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::InputUnparseable,
            format!("ERROR: Could not load the CSV file. Details: {cause}"),
        )
    }

    pub fn missing_columns(missing: Vec<String>) -> Self {
        let message = format!(
            "ERROR: The following required columns are missing from the CSV: {}",
            missing.join(", ")
        );
        Self::new(ErrorKind::MissingColumns(missing), message)
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reference, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_exact_names() {
        let err = AppError::missing_columns(vec!["CustomerAdd2".to_string(), "CustomerAdd4".to_string()]);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().ends_with("CustomerAdd2, CustomerAdd4"));
        assert_eq!(
            err.kind(),
            &ErrorKind::MissingColumns(vec!["CustomerAdd2".to_string(), "CustomerAdd4".to_string()])
        );
    }

    #[test]
    fn exit_codes_distinguish_stages() {
        assert_eq!(AppError::reference("x").exit_code(), 3);
        assert_eq!(AppError::output("x").exit_code(), 4);
        assert_eq!(AppError::input_unparseable("bad quote").exit_code(), 2);
    }
}
