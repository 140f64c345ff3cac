//! Validates a signup form, aggregating every field error.
//!
//! Run with: cargo run --example form_validation

use std::collections::HashMap;

use faultline::error::Safety;
use faultline::prelude::*;

#[derive(Debug)]
struct Signup {
    name: String,
    email: String,
    age: u8,
}

fn field<'a>(form: &'a HashMap<&str, &str>, key: &str) -> Outcome<&'a str> {
    form.lookup(key, "signup form").map(|value| *value)
}

fn name(form: &HashMap<&str, &str>) -> Outcome<String> {
    field(form, "name")
        .map(|value| value.trim().to_string())
        .ensure(|value| !value.is_empty(), "name must not be blank")
}

fn email(form: &HashMap<&str, &str>) -> Outcome<String> {
    field(form, "email")
        .ensure(|value| value.contains('@'), "email must contain @")
        .map(str::to_string)
}

fn age(form: &HashMap<&str, &str>) -> Outcome<u8> {
    field(form, "age")
        .and_then(|value| value.parse::<u8>().context("age must be a number"))
        .ensure(|age| *age >= 18, "must be 18 or older")
}

fn validate(form: &HashMap<&str, &str>) -> Outcome<Signup> {
    (name(form), email(form), age(form))
        .combine_with(|(name, email, age)| Signup { name, email, age })
        .with_context("signup rejected")
}

fn main() {
    let good: HashMap<&str, &str> = [("name", "Ada"), ("email", "ada@example.com"), ("age", "36")]
        .into_iter()
        .collect();
    let bad: HashMap<&str, &str> = [("name", "  "), ("age", "twelve")].into_iter().collect();

    for form in [good, bad] {
        validate(&form).fold(
            |signup| println!("accepted: {:?}", signup),
            |error| {
                println!("rejected (safe):   {}", error.render(Safety::Safe, "\n  - "));
                println!("rejected (unsafe): {:#}", error);
            },
        );
    }
}
