//! Confirmation messages for operations that return no resource.

use std::fmt;

pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let swapped = OperationStatus::success("Swapped targets 3 and 4");
        assert_eq!(swapped.to_string(), "Success: Swapped targets 3 and 4\n");

        let failed = OperationStatus::failure("No journey is being tracked");
        assert!(failed.to_string().starts_with("Error:"));
    }
}
