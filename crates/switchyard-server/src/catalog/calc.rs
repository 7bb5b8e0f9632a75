//! Tools: float arithmetic over two operands.

use serde_json::json;
use switchyard::{Category, HandlerContext, HandlerDescriptor, HandlerError, InputSchema, ParamKind};

use super::num_arg;

fn operand_schema() -> InputSchema {
    InputSchema::new()
        .required("a", ParamKind::Number)
        .required("b", ParamKind::Number)
}

/// Overflowed results would serialize as JSON null inside a success
/// envelope; report them as domain errors instead.
fn finite(value: f64) -> Result<f64, HandlerError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(HandlerError::Domain(
            "result is not a finite number".to_string(),
        ))
    }
}

pub fn add() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Tool,
        "add",
        "Add two numbers.",
        operand_schema(),
        |ctx: HandlerContext| async move {
            let a = num_arg(&ctx.args, "a")?;
            let b = num_arg(&ctx.args, "b")?;
            Ok(json!({ "result": finite(a + b)? }))
        },
    )
}

pub fn subtract() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Tool,
        "subtract",
        "Subtract the second number from the first.",
        operand_schema(),
        |ctx: HandlerContext| async move {
            let a = num_arg(&ctx.args, "a")?;
            let b = num_arg(&ctx.args, "b")?;
            Ok(json!({ "result": finite(a - b)? }))
        },
    )
}

pub fn multiply() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Tool,
        "multiply",
        "Multiply two numbers.",
        operand_schema(),
        |ctx: HandlerContext| async move {
            let a = num_arg(&ctx.args, "a")?;
            let b = num_arg(&ctx.args, "b")?;
            Ok(json!({ "result": finite(a * b)? }))
        },
    )
}

pub fn divide() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Tool,
        "divide",
        "Divide the first number by the second. Division by zero is an error.",
        operand_schema(),
        |ctx: HandlerContext| async move {
            let a = num_arg(&ctx.args, "a")?;
            let b = num_arg(&ctx.args, "b")?;
            if b == 0.0 {
                return Err(HandlerError::Domain("division by zero".to_string()));
            }
            Ok(json!({ "result": finite(a / b)? }))
        },
    )
}
