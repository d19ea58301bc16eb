//! Parser for type references as they appear in module metadata
//!
//! This module uses nom to parse references like:
//! - `int`
//! - `Acme.Contracts.Order`
//! - `System.Collections.Generic.List<Acme.Contracts.OrderLine>`
//! - `Dictionary<int, Order>`
//! - `Order[]`, `int?`, ``List`1<Order>``

use std::fmt;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, multispace0, one_of};
use nom::combinator::{all_consuming, map, opt, recognize};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};

use super::error::ModelError;

/// Definition name used for the `T?` shorthand.
pub const NULLABLE: &str = "System.Nullable";

/// A parsed, not yet resolved, type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Plain (possibly qualified) name: `Order`, `System.Int32`
    Named(String),
    /// Single-dimension array: `T[]`
    Array(Box<TypeRef>),
    /// Generic instantiation: `List<T>`, `Dictionary<K, V>`
    Generic {
        /// Definition name with any arity suffix removed
        name: String,
        /// Type arguments in declaration order
        args: Vec<TypeRef>,
    },
}

enum Suffix {
    Array,
    Nullable,
}

impl TypeRef {
    /// Parse a complete type reference; trailing input is an error.
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        match all_consuming(delimited(multispace0, type_ref, multispace0)).parse(input) {
            Ok((_, parsed)) => Ok(parsed),
            Err(e) => Err(ModelError::InvalidTypeRef {
                type_ref: input.to_string(),
                reason: format!("{e:?}"),
            }),
        }
    }

    /// Last segment of the definition name, without namespace or arguments.
    pub fn simple_name(&self) -> &str {
        match self {
            TypeRef::Named(name) | TypeRef::Generic { name, .. } => simple_name(name),
            TypeRef::Array(element) => element.simple_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::Array(element) => write!(f, "{element}[]"),
            TypeRef::Generic { name, args } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
        }
    }
}

/// Last `.`/`+` separated segment of a qualified name, arity suffix removed.
pub fn simple_name(name: &str) -> &str {
    let last = name.rsplit(['.', '+']).next().unwrap_or(name);
    strip_arity(last)
}

/// `List`1` -> `List`
pub fn strip_arity(name: &str) -> &str {
    name.split('`').next().unwrap_or(name)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '`').parse(input)
}

fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(one_of(".+"), identifier)).parse(input)
}

fn generic_args(input: &str) -> IResult<&str, Vec<TypeRef>> {
    delimited(
        pair(char('<'), multispace0),
        separated_list1(delimited(multispace0, char(','), multispace0), type_ref),
        pair(multispace0, char('>')),
    )
    .parse(input)
}

fn suffix(input: &str) -> IResult<&str, Suffix> {
    alt((
        map(tag("[]"), |_| Suffix::Array),
        map(char('?'), |_| Suffix::Nullable),
    ))
    .parse(input)
}

fn type_ref(input: &str) -> IResult<&str, TypeRef> {
    let (input, (name, args)) = pair(qualified_name, opt(generic_args)).parse(input)?;
    let (input, suffixes) = many0(suffix).parse(input)?;

    let base = match args {
        Some(args) => TypeRef::Generic {
            name: strip_arity(name).to_string(),
            args,
        },
        None => TypeRef::Named(name.to_string()),
    };
    let wrapped = suffixes.into_iter().fold(base, |inner, s| match s {
        Suffix::Array => TypeRef::Array(Box::new(inner)),
        Suffix::Nullable => TypeRef::Generic {
            name: NULLABLE.to_string(),
            args: vec![inner],
        },
    });
    Ok((input, wrapped))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn named(s: &str) -> TypeRef {
        TypeRef::Named(s.to_string())
    }

    #[test]
    fn test_plain_and_qualified_names() {
        assert_eq!(TypeRef::parse("int").unwrap(), named("int"));
        assert_eq!(
            TypeRef::parse("Acme.Contracts.Order").unwrap(),
            named("Acme.Contracts.Order")
        );
        assert_eq!(TypeRef::parse("  Order ").unwrap(), named("Order"));
    }

    #[test]
    fn test_nested_generics_and_arrays() {
        let parsed = TypeRef::parse("List<Dictionary<int, Order[]>>").unwrap();
        assert_eq!(
            parsed,
            TypeRef::Generic {
                name: "List".to_string(),
                args: vec![TypeRef::Generic {
                    name: "Dictionary".to_string(),
                    args: vec![named("int"), TypeRef::Array(Box::new(named("Order")))],
                }],
            }
        );
        assert_eq!(parsed.to_string(), "List<Dictionary<int, Order[]>>");
    }

    #[test]
    fn test_nullable_shorthand_and_jagged_arrays() {
        assert_eq!(
            TypeRef::parse("int?").unwrap(),
            TypeRef::Generic {
                name: NULLABLE.to_string(),
                args: vec![named("int")],
            }
        );
        assert_eq!(
            TypeRef::parse("byte[][]").unwrap(),
            TypeRef::Array(Box::new(TypeRef::Array(Box::new(named("byte")))))
        );
    }

    #[test]
    fn test_arity_suffix_is_stripped() {
        let parsed = TypeRef::parse("System.Collections.Generic.List`1<Order>").unwrap();
        assert_eq!(parsed.simple_name(), "List");
        assert!(matches!(parsed, TypeRef::Generic { ref name, .. } if name == "System.Collections.Generic.List"));
    }

    #[test]
    fn test_malformed_references_are_rejected() {
        for bad in ["", "List<", "List<>", "Order]", "Foo<Bar>>", "a..b"] {
            assert!(
                matches!(TypeRef::parse(bad), Err(ModelError::InvalidTypeRef { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_simple_name_of_nested_type() {
        assert_eq!(simple_name("Acme.Outer+Inner"), "Inner");
        assert_eq!(simple_name("Order"), "Order");
    }
}
