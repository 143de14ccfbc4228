//! Well-known names shared between the mangler and the hosts that drive it.

/// Fully qualified name of the unit type. Callables returning it omit the
/// return type from their mangle.
pub const DEFAULT_UNIT_FQN: &str = "lang.Unit";

/// Packages whose `Function<N>`-style classes are synthesized by the compiler
/// rather than declared in source.
pub const FUNCTION_CLASS_PACKAGES: &[&str] = &["lang", "lang.coroutines", "lang.reflect"];

/// Marker embedded in the mangles of synthesized function classes.
pub const BUILT_IN_FUNCTION_PREFIX: &str = "<BUILT-IN-FUNCTION>";

/// Package reported for compiler intrinsics.
pub const BUILT_IN_PACKAGE: &str = "lang.internal.ir";

/// Name given to constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name of the single abstract member of a function class.
pub const INVOKE_NAME: &str = "invoke";

/// Mangle of a synthesized function class, e.g. `ktype:<BUILT-IN-FUNCTION>Function2`.
pub fn function_class_symbol_name(class_name: &str) -> String {
    format!("ktype:{BUILT_IN_FUNCTION_PREFIX}{class_name}")
}

/// Mangle of the `invoke` member of a synthesized function class.
pub fn function_invoke_symbol_name(class_name: &str) -> String {
    format!("kfun:{BUILT_IN_FUNCTION_PREFIX}{class_name}.{INVOKE_NAME}")
}

/// Whether `name` is one of `Function<N>`, `KFunction<N>`, `SuspendFunction<N>`
/// or `KSuspendFunction<N>`.
pub fn is_function_class_name(name: &str) -> bool {
    let rest = name.strip_prefix('K').unwrap_or(name);
    let rest = rest.strip_prefix("Suspend").unwrap_or(rest);
    match rest.strip_prefix("Function") {
        Some(arity) => !arity.is_empty() && arity.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Default accessor name for a property getter, e.g. `<get-value>`.
pub fn getter_name(property: &str) -> String {
    format!("<get-{property}>")
}

/// Default accessor name for a property setter, e.g. `<set-value>`.
pub fn setter_name(property: &str) -> String {
    format!("<set-{property}>")
}

/// Strip the `<...>` wrapping some hosts put around module names.
pub fn module_salt(module_name: &str) -> &str {
    module_name
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(module_name)
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod tests;
