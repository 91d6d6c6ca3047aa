/// ## Machine errors
///
/// Every failure the machine can report is an `Error`. Most are recoverable:
/// the engine writes them to the diagnostics buffer and moves on to the next
/// instruction. Memory faults are fatal and halt the program.

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: Option<usize>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Fatal errors stop the machine. Only memory faults are fatal.
    pub fn is_fatal(&self) -> bool {
        self.code == ErrorCode::MemoryOutOfRange as u16
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn in_line_number(self, line: usize) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    DivisionByZero = 1,
    IllegalFunctionCall = 2,
    StackEmpty = 3,
    TypeMismatch = 4,
    SubscriptOutOfRange = 5,
    IllegalArraySize = 6,
    UndefinedLabel = 7,
    ReadOnlyArgument = 8,
    WrongArgumentCount = 9,
    MemoryOutOfRange = 10,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "DIVISION BY ZERO",
            2 => "ILLEGAL FUNCTION CALL",
            3 => "STACK EMPTY",
            4 => "TYPE MISMATCH",
            5 => "SUBSCRIPT OUT OF RANGE",
            6 => "ILLEGAL ARRAY SIZE",
            7 => "UNDEFINED LABEL",
            8 => "READ ONLY ARGUMENT",
            9 => "WRONG ARGUMENT COUNT",
            10 => "MEMORY OUT OF RANGE",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let text = if !self.message.is_empty() {
            self.message.clone()
        } else if !code_str.is_empty() {
            code_str.to_string()
        } else {
            format!("PROGRAM ERROR {}", self.code)
        };
        match self.line_number {
            Some(line) => write!(f, "ERROR(line {}): {}", line, text),
            None => write!(f, "ERROR: {}", text),
        }
    }
}

impl std::error::Error for Error {}
