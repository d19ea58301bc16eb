use std::fmt;

use super::metadata::HttpVerb;
use super::type_ref::{simple_name, strip_arity};

/// Identity of a declared type: its canonical name within its module.
///
/// Two descriptors of the same declared type compare and hash equal, which is
/// what [`crate::graph::ModelSet`] deduplicates on. Ordering is by module then
/// name, giving deterministic output order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId {
    pub module: String,
    pub name: String,
}

impl TypeId {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        TypeId {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Name without namespace (`Acme.Contracts.Order` -> `Order`)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.module)
    }
}

/// Built-in types known without any loaded module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Char,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Void,
    /// Non-generic `Task`: an asynchronous method without a result
    Task,
    /// `object` / `dynamic`: deliberately untyped
    Object,
}

impl Primitive {
    /// Look up a built-in by full name (`System.Int32`) or keyword alias (`int`).
    pub fn from_name(name: &str) -> Option<Self> {
        let p = match name {
            "bool" | "System.Boolean" | "Boolean" => Primitive::Boolean,
            "byte" | "System.Byte" | "Byte" => Primitive::Byte,
            "sbyte" | "System.SByte" | "SByte" => Primitive::SByte,
            "short" | "System.Int16" | "Int16" => Primitive::Int16,
            "ushort" | "System.UInt16" | "UInt16" => Primitive::UInt16,
            "int" | "System.Int32" | "Int32" => Primitive::Int32,
            "uint" | "System.UInt32" | "UInt32" => Primitive::UInt32,
            "long" | "System.Int64" | "Int64" => Primitive::Int64,
            "ulong" | "System.UInt64" | "UInt64" => Primitive::UInt64,
            "float" | "System.Single" | "Single" => Primitive::Single,
            "double" | "System.Double" | "Double" => Primitive::Double,
            "decimal" | "System.Decimal" | "Decimal" => Primitive::Decimal,
            "char" | "System.Char" | "Char" => Primitive::Char,
            "string" | "System.String" | "String" => Primitive::String,
            "System.Guid" | "Guid" => Primitive::Guid,
            "System.DateTime" | "DateTime" => Primitive::DateTime,
            "System.DateTimeOffset" | "DateTimeOffset" => Primitive::DateTimeOffset,
            "System.TimeSpan" | "TimeSpan" => Primitive::TimeSpan,
            "void" | "System.Void" | "Void" => Primitive::Void,
            "System.Threading.Tasks.Task" | "Task" => Primitive::Task,
            "object" | "dynamic" | "System.Object" | "Object" => Primitive::Object,
            _ => return None,
        };
        Some(p)
    }

    /// Target-language name, or `None` for types that stay untyped.
    pub fn target_name(self) -> Option<&'static str> {
        match self {
            Primitive::Boolean => Some("boolean"),
            Primitive::Byte
            | Primitive::SByte
            | Primitive::Int16
            | Primitive::UInt16
            | Primitive::Int32
            | Primitive::UInt32
            | Primitive::Int64
            | Primitive::UInt64
            | Primitive::Single
            | Primitive::Double
            | Primitive::Decimal => Some("number"),
            Primitive::Char | Primitive::String | Primitive::Guid | Primitive::TimeSpan => {
                Some("string")
            }
            Primitive::DateTime | Primitive::DateTimeOffset => Some("Date"),
            Primitive::Void | Primitive::Task => Some("void"),
            Primitive::Object => None,
        }
    }
}

/// Read-only view of a type in the loaded object model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Built-in type
    Primitive(Primitive),
    /// Class, struct, interface or enum declared by a loaded module
    Declared(TypeId),
    /// Single-dimension array of the element type
    Array(Box<TypeDescriptor>),
    /// Instantiation of a generic definition declared by a loaded module
    /// (`Shop.PagedResult<Shop.Order>` with ``Shop.PagedResult`1`` declared)
    Constructed {
        definition: TypeId,
        args: Vec<TypeDescriptor>,
    },
    /// Instantiation of a generic definition that no loaded module declares
    Generic {
        /// Definition name as referenced (`List`, `System.Collections.Generic.List`)
        definition: String,
        args: Vec<TypeDescriptor>,
    },
    /// Named type that no loaded module declares
    Unresolved(String),
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => write!(f, "{p:?}"),
            TypeDescriptor::Declared(id) => write!(f, "{}", id.name),
            TypeDescriptor::Array(element) => write!(f, "{element}[]"),
            TypeDescriptor::Constructed { definition, args } => {
                write_generic(f, strip_arity(&definition.name), args)
            }
            TypeDescriptor::Generic { definition, args } => write_generic(f, definition, args),
            TypeDescriptor::Unresolved(name) => write!(f, "{name}"),
        }
    }
}

fn write_generic(f: &mut fmt::Formatter<'_>, definition: &str, args: &[TypeDescriptor]) -> fmt::Result {
    write!(f, "{definition}<")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ">")
}

/// A declared property with its type resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// A method parameter with its type resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// An endpoint method: return type plus ordered parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub returns: TypeDescriptor,
    pub parameters: Vec<ParameterDescriptor>,
    /// Explicit verb from the metadata, if any
    pub verb: Option<HttpVerb>,
    /// Explicit route segment from the metadata, if any
    pub route: Option<String>,
}
