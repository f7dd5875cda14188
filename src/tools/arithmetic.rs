//! Arithmetic tools: add, subtract, multiply, divide
//!
//! Fully synchronous pure computation; the async signature exists only to
//! satisfy the handler trait. Division by zero is an expected domain
//! failure, reported as a tagged outcome rather than a fault.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ToolHandler, ToolOutcome, number_arg};
use crate::error::Result;
use crate::schema::{InputSchema, ParamSpec, ToolArgs};

fn operand_schema() -> InputSchema {
    InputSchema::new()
        .param("a", ParamSpec::number("First operand").required())
        .param("b", ParamSpec::number("Second operand").required())
}

fn payload(operation: &str, a: f64, b: f64, result: f64) -> Value {
    json!({
        "success": true,
        "result": result,
        "operation": operation,
        "operands": { "a": a, "b": b },
    })
}

pub struct AddTool;

#[async_trait]
impl ToolHandler for AddTool {
    fn name(&self) -> &'static str {
        "add"
    }

    fn description(&self) -> &'static str {
        "Add two numbers and return the sum"
    }

    fn schema(&self) -> InputSchema {
        operand_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let a = number_arg(args, "a")?;
        let b = number_arg(args, "b")?;
        Ok(ToolOutcome::Success(payload("add", a, b, a + b)))
    }
}

pub struct SubtractTool;

#[async_trait]
impl ToolHandler for SubtractTool {
    fn name(&self) -> &'static str {
        "subtract"
    }

    fn description(&self) -> &'static str {
        "Subtract the second number from the first"
    }

    fn schema(&self) -> InputSchema {
        operand_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let a = number_arg(args, "a")?;
        let b = number_arg(args, "b")?;
        Ok(ToolOutcome::Success(payload("subtract", a, b, a - b)))
    }
}

pub struct MultiplyTool;

#[async_trait]
impl ToolHandler for MultiplyTool {
    fn name(&self) -> &'static str {
        "multiply"
    }

    fn description(&self) -> &'static str {
        "Multiply two numbers and return the product"
    }

    fn schema(&self) -> InputSchema {
        operand_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let a = number_arg(args, "a")?;
        let b = number_arg(args, "b")?;
        Ok(ToolOutcome::Success(payload("multiply", a, b, a * b)))
    }
}

pub struct DivideTool;

#[async_trait]
impl ToolHandler for DivideTool {
    fn name(&self) -> &'static str {
        "divide"
    }

    fn description(&self) -> &'static str {
        "Divide the first number by the second"
    }

    fn schema(&self) -> InputSchema {
        operand_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let a = number_arg(args, "a")?;
        let b = number_arg(args, "b")?;
        if b == 0.0 {
            return Ok(ToolOutcome::Failure(
                "Division by zero is not allowed".to_string(),
            ));
        }
        Ok(ToolOutcome::Success(payload("divide", a, b, a / b)))
    }
}
