use derive_more::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "cannot open {}: {}", path, source)]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "cannot read {}: {}", path, source)]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "line {}: expected two node ids, found {:?}", line, content)]
    Malformed { line: usize, content: String },
    #[display(fmt = "cannot allocate {} {}", len, what)]
    Allocation { what: &'static str, len: usize },
    #[display(fmt = "invalid worker count {}, must be at least 1", _0)]
    InvalidWorkerCount(usize),
    #[display(fmt = "cannot start worker pool: {}", _0)]
    WorkerPool(String),
    #[display(fmt = "cannot write {}: {}", path, source)]
    Write {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the error belongs to the input class: a missing or unreadable
    /// source, or a data line that is not two node ids.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::Open { .. } | Error::Read { .. } | Error::Malformed { .. }
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. }
            | Error::Read { source, .. }
            | Error::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_class() {
        let malformed = Error::Malformed {
            line: 3,
            content: String::from("1 x"),
        };
        assert!(malformed.is_parse_error());
        assert_eq!(
            malformed.to_string(),
            "line 3: expected two node ids, found \"1 x\""
        );
        assert!(!Error::InvalidWorkerCount(0).is_parse_error());
        assert!(!Error::Allocation {
            what: "counters",
            len: 10
        }
        .is_parse_error());
    }
}
