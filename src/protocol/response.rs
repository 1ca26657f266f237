use crate::Fault;

/// Outbound message written once at the end of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Reply tokens in execution order.
    Body(Vec<String>),
    /// Replaces the body when the session faults.
    Fault(Fault),
}

impl Response {
    /// Renders the wire form.
    ///
    /// A body is its tokens joined by newlines followed by a blank line. A
    /// fault is its marker followed by a single newline.
    pub fn encode(&self) -> String {
        match self {
            Response::Body(tokens) => {
                let mut out = tokens.join("\n");
                out.push_str("\n\n");
                out
            }
            Response::Fault(fault) => format!("{}\n", fault.marker()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Verb;

    use super::*;

    #[test]
    fn body_ends_with_blank_line() {
        let body = Response::Body(vec!["FIN".into(), "alice".into(), "1".into()]);

        assert_eq!(body.encode(), "FIN\nalice\n1\n\n");
    }

    #[test]
    fn empty_body_is_only_the_marker() {
        assert_eq!(Response::Body(Vec::new()).encode(), "\n\n");
    }

    #[test]
    fn fault_is_short_marker() {
        let fault = Response::Fault(Fault::MissingKey(Verb::Write));

        assert_eq!(fault.encode(), "INCK\n");
        assert!(!fault.encode().ends_with("\n\n"));
    }
}
