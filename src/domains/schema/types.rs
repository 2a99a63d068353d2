//! Type descriptors for tool signatures.
//!
//! Tools declare their parameters and return type with explicit [`TypeTag`]
//! descriptors instead of runtime reflection. A descriptor carries exactly
//! the information the schema mapper needs: the value's shape, optionality,
//! and element type for parametrized sequences.

/// A closed description of a value type, used for both input parameter
/// declarations and output validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// UTF-8 string.
    String,

    /// Whole number.
    Integer,

    /// Integer or floating-point number.
    Number,

    /// Boolean.
    Boolean,

    /// JSON null.
    Null,

    /// A nullable value of the inner type.
    Optional(Box<TypeTag>),

    /// A sequence, optionally parametrized by its element type.
    List(Option<Box<TypeTag>>),

    /// A string-keyed mapping. No deeper property inference is performed.
    Map,

    /// An unknown or unannotated type.
    Any,
}

impl TypeTag {
    /// Convenience constructor for a nullable type.
    pub fn optional(inner: TypeTag) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Convenience constructor for a parametrized sequence.
    pub fn list_of(element: TypeTag) -> Self {
        Self::List(Some(Box::new(element)))
    }

    /// Convenience constructor for an unparametrized sequence.
    pub fn list() -> Self {
        Self::List(None)
    }
}

/// A single declared parameter: name, type, and whether the function supplies
/// a default for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name as it appears in the argument bag.
    pub name: String,

    /// Declared type of the parameter.
    pub ty: TypeTag,

    /// Whether the function supplies a default value. Parameters without a
    /// default are listed as required in the input schema.
    pub has_default: bool,
}

impl Param {
    /// A parameter without a default value (required).
    pub fn required(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    /// A parameter with a default value (optional).
    pub fn with_default(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: true,
        }
    }
}

/// The declared signature of a tool function: its parameters in declaration
/// order and, if annotated, its return type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    /// Parameters in declaration order.
    pub params: Vec<Param>,

    /// Declared return type, if any. Absence means no output schema is
    /// generated for the tool.
    pub returns: Option<TypeTag>,
}

impl Signature {
    /// Create a signature from a parameter list, with no return annotation.
    pub fn new(params: impl IntoIterator<Item = Param>) -> Self {
        Self {
            params: params.into_iter().collect(),
            returns: None,
        }
    }

    /// Declare the return type.
    pub fn returns(mut self, ty: TypeTag) -> Self {
        self.returns = Some(ty);
        self
    }
}
