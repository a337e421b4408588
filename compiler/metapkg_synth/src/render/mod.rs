//! Type-name renderer.
//!
//! Produces the canonical Go spelling of a [`TypeShape`], qualified by
//! package name (`calc.Counter`, `map[string][]*calc.Counter`). Used wherever
//! the declaration synthesizer embeds a type it does not build structurally:
//! array, slice, map and channel elements, and closure signatures.

use metapkg_ir::{is_exported, ChanDir, Signature, TypeShape};

use crate::SynthError;

/// Spell `ty` as Go source.
///
/// Fails with [`SynthError::TypeResolution`] for shapes with no spelling
/// outside their declaring scope: type parameters, pointers to anything but
/// a primitive or named type, and anything naming an unexported identifier
/// of another unit.
pub fn type_name(ty: &TypeShape) -> Result<String, SynthError> {
    let mut out = String::new();
    write_type(&mut out, ty)?;
    Ok(out)
}

/// Spell a parameter's type, using `...T` when it is the variadic tail.
pub(crate) fn param_type_name(ty: &TypeShape, variadic: bool) -> Result<String, SynthError> {
    match ty {
        TypeShape::Slice { elem } if variadic => Ok(format!("...{}", type_name(elem)?)),
        _ => type_name(ty),
    }
}

fn write_type(out: &mut String, ty: &TypeShape) -> Result<(), SynthError> {
    match ty {
        TypeShape::Primitive { basic } => out.push_str(basic.spelling()),
        TypeShape::Named {
            unit,
            name,
            type_args,
        } => {
            if let Some(unit) = unit {
                if !is_exported(name) {
                    return Err(SynthError::resolution(format!(
                        "unexported type {}.{name}",
                        unit.name
                    )));
                }
                out.push_str(&unit.name);
                out.push('.');
            }
            out.push_str(name);
            if !type_args.is_empty() {
                out.push('[');
                for (i, arg) in type_args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, arg)?;
                }
                out.push(']');
            }
        }
        TypeShape::Pointer { elem } => match elem.as_ref() {
            TypeShape::Primitive { .. } | TypeShape::Named { .. } => {
                out.push('*');
                write_type(out, elem)?;
            }
            other => {
                return Err(SynthError::resolution(format!(
                    "pointer to {}",
                    other.kind_name()
                )))
            }
        },
        TypeShape::Array { len, elem } => {
            out.push('[');
            out.push_str(&len.to_string());
            out.push(']');
            write_type(out, elem)?;
        }
        TypeShape::Slice { elem } => {
            out.push_str("[]");
            write_type(out, elem)?;
        }
        TypeShape::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key)?;
            out.push(']');
            write_type(out, value)?;
        }
        TypeShape::Channel { dir, elem } => {
            out.push_str(match dir {
                ChanDir::Both => "chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
            });
            // `chan <-chan T` would parse as `chan<- (chan T)`.
            let needs_parens = *dir == ChanDir::Both
                && matches!(
                    elem.as_ref(),
                    TypeShape::Channel {
                        dir: ChanDir::Recv,
                        ..
                    }
                );
            if needs_parens {
                out.push('(');
            }
            write_type(out, elem)?;
            if needs_parens {
                out.push(')');
            }
        }
        TypeShape::Interface { methods } => {
            if methods.is_empty() {
                out.push_str("interface{}");
            } else {
                out.push_str("interface{ ");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !is_exported(&method.name) {
                        return Err(SynthError::resolution(format!(
                            "interface with unexported method {}",
                            method.name
                        )));
                    }
                    out.push_str(&method.name);
                    write_signature(out, &method.signature)?;
                }
                out.push_str(" }");
            }
        }
        TypeShape::Struct { fields } => {
            if fields.is_empty() {
                out.push_str("struct{}");
            } else {
                out.push_str("struct{ ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded && !field.name.is_empty() {
                        if !is_exported(&field.name) {
                            return Err(SynthError::resolution(format!(
                                "struct with unexported field {}",
                                field.name
                            )));
                        }
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    write_type(out, &field.ty)?;
                    if !field.tag.is_empty() {
                        out.push(' ');
                        write_tag(out, &field.tag);
                    }
                }
                out.push_str(" }");
            }
        }
        TypeShape::Signature(signature) => {
            out.push_str("func");
            write_signature(out, signature)?;
        }
        TypeShape::TypeParam { name } => {
            return Err(SynthError::resolution(format!("type parameter {name}")));
        }
    }
    Ok(())
}

/// A struct tag as a raw string literal, or as an interpreted one when the
/// tag contains a backquote or a carriage return (raw literals drop `\r`).
fn write_tag(out: &mut String, tag: &str) {
    if !tag.contains(['`', '\r']) {
        out.push('`');
        out.push_str(tag);
        out.push('`');
        return;
    }
    out.push('"');
    for c in tag.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// `(params) results`, the part of a function type after `func` or a
/// method name.
fn write_signature(out: &mut String, signature: &Signature) -> Result<(), SynthError> {
    out.push('(');
    let last = signature.params.len().saturating_sub(1);
    for (i, param) in signature.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param_type_name(&param.ty, signature.variadic && i == last)?);
    }
    out.push(')');

    match signature.results.as_slice() {
        [] => {}
        [single] => {
            out.push(' ');
            write_type(out, &single.ty)?;
        }
        results => {
            out.push_str(" (");
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, &result.ty)?;
            }
            out.push(')');
        }
    }
    Ok(())
}
