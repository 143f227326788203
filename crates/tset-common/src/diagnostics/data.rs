use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // Malformed interface elements
    pub const BLANK_METHOD_NAME: u32 = 1001;
    pub const NOT_A_METHOD_SIGNATURE: u32 = 1002;
    pub const METHOD_TYPE_PARAMETERS: u32 = 1003;

    // Method-set merging
    pub const DUPLICATE_METHOD: u32 = 1004;
    pub const OTHER_DECLARATION: u32 = 1005;

    // Embedded elements
    pub const EMBEDDED_TYPE_PARAMETER: u32 = 1006;
    pub const EMBEDDED_NOT_AN_INTERFACE: u32 = 1007;

    // Legacy type lists
    pub const LEGACY_TYPE_LIST: u32 = 1008;
    pub const MULTIPLE_TYPE_LISTS: u32 = 1009;

    // Type expressions
    pub const UNDECLARED_NAME: u32 = 1010;
    pub const INVALID_TILDE: u32 = 1011;
    pub const OVERLAPPING_TERMS: u32 = 1012;
}

use diagnostic_codes as c;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: c::BLANK_METHOD_NAME,
        category: DiagnosticCategory::Error,
        message: "methods must have a unique non-blank name",
    },
    DiagnosticMessage {
        code: c::NOT_A_METHOD_SIGNATURE,
        category: DiagnosticCategory::Error,
        message: "{0} is not a method signature",
    },
    DiagnosticMessage {
        code: c::METHOD_TYPE_PARAMETERS,
        category: DiagnosticCategory::Error,
        message: "methods cannot have type parameters",
    },
    DiagnosticMessage {
        code: c::DUPLICATE_METHOD,
        category: DiagnosticCategory::Error,
        message: "duplicate method {0}",
    },
    DiagnosticMessage {
        code: c::OTHER_DECLARATION,
        category: DiagnosticCategory::Message,
        message: "other declaration of {0}",
    },
    DiagnosticMessage {
        code: c::EMBEDDED_TYPE_PARAMETER,
        category: DiagnosticCategory::Error,
        message: "{0} is a type parameter, not an interface",
    },
    DiagnosticMessage {
        code: c::EMBEDDED_NOT_AN_INTERFACE,
        category: DiagnosticCategory::Error,
        message: "{0} is not an interface",
    },
    DiagnosticMessage {
        code: c::LEGACY_TYPE_LIST,
        category: DiagnosticCategory::Warning,
        message: "use generalized embedding syntax instead of a type list",
    },
    DiagnosticMessage {
        code: c::MULTIPLE_TYPE_LISTS,
        category: DiagnosticCategory::Error,
        message: "cannot have multiple type lists in an interface",
    },
    DiagnosticMessage {
        code: c::UNDECLARED_NAME,
        category: DiagnosticCategory::Error,
        message: "undeclared name: {0}",
    },
    DiagnosticMessage {
        code: c::INVALID_TILDE,
        category: DiagnosticCategory::Error,
        message: "invalid use of ~ (underlying type of {0} is {1})",
    },
    DiagnosticMessage {
        code: c::OVERLAPPING_TERMS,
        category: DiagnosticCategory::Error,
        message: "overlapping terms {0} and {1}",
    },
];
