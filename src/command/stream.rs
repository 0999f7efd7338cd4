/// One decoded line of process output, either stdout or stderr
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    Stdout(String),
    Stderr(String),
}

impl OutputEvent {
    pub fn line(&self) -> &str {
        match self {
            OutputEvent::Stdout(line) | OutputEvent::Stderr(line) => line,
        }
    }
}
