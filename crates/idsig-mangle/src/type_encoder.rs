//! Structural type encoding.
//!
//! A resolved type is rendered from its structure only:
//!
//! | Shape | Encoding |
//! |-------|----------|
//! | class reference | the class's raw mangle, e.g. `lang.collections.List` |
//! | type parameter | `<container-index>:<parameter-index>` |
//! | type arguments | `<a,b,...>`, `*` for star, `in\|`/`out\|` prefix for projections |
//! | nullable | trailing `?` |
//! | dynamic | `<dynamic>` |
//!
//! Type parameter names never appear, so renaming `T` to `U` leaves every
//! encoding unchanged.

use crate::computer::MangleComputer;
use crate::error::MangleError;
use crate::hooks::ManglerHooks;
use idsig_tree::{Classifier, DeclId, DeclKind, DeclarationTree, StructuralType, TypeArgument, Variance};

/// Resolves the classifiers of a type while it is being encoded.
pub trait ClassifierEncoder {
    /// Append the canonical path of `class`.
    fn encode_class(&self, out: &mut String, class: DeclId) -> Result<(), MangleError>;

    /// Append the positional token of the type parameter `param`.
    fn encode_type_parameter(&self, out: &mut String, param: DeclId) -> Result<(), MangleError>;

    /// Rendered declaration, used in error messages.
    fn render(&self, id: DeclId) -> String;
}

/// Append the encoding of `ty` to `out`.
///
/// `owner` is the declaration whose signature mentions `ty`; it is only used
/// to give context to errors.
pub fn encode_type<E: ClassifierEncoder + ?Sized>(
    out: &mut String,
    ty: &StructuralType,
    owner: DeclId,
    encoder: &E,
) -> Result<(), MangleError> {
    match ty {
        StructuralType::Simple {
            classifier,
            nullable,
            arguments,
        } => {
            match *classifier {
                Classifier::Class(class) => encoder.encode_class(out, class)?,
                Classifier::TypeParameter(param) => encoder.encode_type_parameter(out, param)?,
            }

            if !arguments.is_empty() {
                out.push('<');
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    match argument {
                        TypeArgument::Star => out.push('*'),
                        TypeArgument::Projection { variance, ty } => {
                            if *variance != Variance::Invariant {
                                out.push_str(variance.label());
                                out.push('|');
                            }
                            encode_type(out, ty, owner, encoder)?;
                        }
                    }
                }
                out.push('>');
            }

            if *nullable {
                out.push('?');
            }
        }
        StructuralType::Dynamic => out.push_str("<dynamic>"),
        StructuralType::Error => {
            return Err(MangleError::UnexpectedType {
                shape: "<error>".to_string(),
                rendered: encoder.render(owner),
            });
        }
    }
    Ok(())
}

/// Encoder with a caller-supplied type parameter namer.
struct NamerEncoder<'a, T: DeclarationTree + ?Sized, F> {
    tree: &'a T,
    hooks: &'a dyn ManglerHooks<T>,
    namer: F,
}

impl<T, F> ClassifierEncoder for NamerEncoder<'_, T, F>
where
    T: DeclarationTree + ?Sized,
    F: Fn(DeclId) -> String,
{
    fn encode_class(&self, out: &mut String, class: DeclId) -> Result<(), MangleError> {
        if !matches!(self.tree.kind(class), DeclKind::Class(_)) {
            return Err(MangleError::UnexpectedClassifier {
                rendered: self.tree.render(class),
            });
        }
        let computer = MangleComputer::new(self.tree, self.hooks);
        out.push_str(&computer.compute_mangle(class, false)?);
        Ok(())
    }

    fn encode_type_parameter(&self, out: &mut String, param: DeclId) -> Result<(), MangleError> {
        if self.tree.kind(param) != DeclKind::TypeParameter {
            return Err(MangleError::UnexpectedClassifier {
                rendered: self.tree.render(param),
            });
        }
        out.push_str(&(self.namer)(param));
        Ok(())
    }

    fn render(&self, id: DeclId) -> String {
        self.tree.render(id)
    }
}

/// Encode `ty` on its own, naming type parameters with `namer`.
///
/// Class references are mangled with `hooks`.
pub fn encode_type_with<T, F>(
    tree: &T,
    hooks: &dyn ManglerHooks<T>,
    ty: &StructuralType,
    owner: DeclId,
    namer: F,
) -> Result<String, MangleError>
where
    T: DeclarationTree + ?Sized,
    F: Fn(DeclId) -> String,
{
    let encoder = NamerEncoder { tree, hooks, namer };
    let mut out = String::new();
    encode_type(&mut out, ty, owner, &encoder)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/type_encoder_tests.rs"]
mod tests;
