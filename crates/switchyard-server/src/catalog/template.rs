//! Template: render a user profile from name, age, and interests.

use serde_json::{json, Value};
use switchyard::{Category, HandlerContext, HandlerDescriptor, InputSchema, ParamKind};

use super::{num_arg, str_arg};

pub fn user() -> HandlerDescriptor {
    HandlerDescriptor::new(
        Category::Template,
        "user",
        "Render a user profile with a summary line.",
        InputSchema::new()
            .required("name", ParamKind::String)
            .required("age", ParamKind::Number)
            .optional("interests", ParamKind::StringList),
        |ctx: HandlerContext| async move {
            let name = str_arg(&ctx.args, "name")?;
            let age = num_arg(&ctx.args, "age")?;
            let interests: Vec<String> = ctx
                .args
                .get("interests")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            ctx.progress.report("rendering profile").await;

            let profile_summary = if interests.is_empty() {
                format!("{name} is {age} years old.")
            } else {
                format!(
                    "{name} is {age} years old and is interested in {}.",
                    interests.join(", ")
                )
            };

            Ok(json!({
                "user_info": {
                    "name": name,
                    "age": age,
                    "interests": interests,
                    "profile_summary": profile_summary,
                }
            }))
        },
    )
    .streaming()
}
