use std::{borrow::Cow, error::Error, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Error reported by the document lexer.
///
/// The external scanners never fail; these only guard the driver.
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub pos: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// More elements are open than `max_depth` allows.
    NestingTooDeep(usize),
    /// No scanner or driver rule made progress.
    Stalled,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason: Cow<_> = match self.kind {
            SyntaxErrorKind::NestingTooDeep(max) => {
                format!("elements nested deeper than {max}").into()
            }
            SyntaxErrorKind::Stalled => "lexer made no progress".into(),
        };

        write!(f, "syntax error '{reason}' at position {}", self.pos)
    }
}

impl Error for SyntaxError {}
