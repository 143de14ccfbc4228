use idsig_tree::DeclKind;
use thiserror::Error;

/// Internal compiler errors raised while mangling.
///
/// None of these are user diagnostics: every input has been validated by the
/// type checker, so reaching one means the tree handed to the mangler is
/// malformed. Each variant carries the rendered offending declaration so the
/// driver can abort with full context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MangleError {
    #[error("declaration of kind {kind:?} cannot be mangled on its own: {rendered}")]
    NotAMangleRoot { kind: DeclKind, rendered: String },

    #[error("unexpected type shape `{shape}` in {rendered}")]
    UnexpectedType { shape: String, rendered: String },

    #[error("type classifier is not a class or type parameter: {rendered}")]
    UnexpectedClassifier { rendered: String },

    #[error("no tracked container for type parameter {rendered}")]
    UnknownTypeParameterContainer { rendered: String },

    #[error("unexpected type parameter container for {rendered}")]
    UnexpectedTypeParameterParent { rendered: String },

    #[error("accessor or backing field has no corresponding property: {rendered}")]
    MissingCorrespondingProperty { rendered: String },
}
