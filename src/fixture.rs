//! Example module to demonstrate linting and code formatting with rustfmt and clippy.
//!
//! The layout below is left unformatted on purpose; `cargo fmt` and
//! `cargo clippy` are expected to flag and rewrite it.

use std::collections::HashMap;
use std::env;
use serde_json::Value;



pub fn decode_parameters(json_string:&str)->serde_json::Result<HashMap<String,Value>>{
    let data:HashMap<String,Value>=serde_json::from_str(json_string)?;
    Ok(data)
}

/// This function demonstrates various linting and formatting issues.
pub fn example_function(parameter1:i64,parameter2:i64)->serde_json::Result<HashMap<String,Value>>{
    if parameter1==1 { println!("Parameter 1 is one"); }
    if parameter2==2
    {
        println!("Parameter 2 is two");
    }

    println!("This is a very long line that is meant to demonstrate how rustfmt can automatically format code and break it into multiple lines if it exceeds the maximum line length set in the configuration.");

    let json_string="{\"name\":\"John\", \"age\": 30, \"city\": \"New York\"}";
    let data=decode_parameters(json_string)?;

    let a_number = 42;

    return Ok(data);
}

/// A function that takes many parameters to demonstrate line breaking.
pub fn example_function_many_parameters(parameter1:i64, parameter2:i64, parameter3:i64, parameter4:i64, parameter5:i64, parameter6:i64, parameter7:i64, parameter8:i64, parameter9:i64, parameter10:i64){


    println!("Parameters received: {}, {}, {}, {}, {}, {}, {}, {}, {}, {}", parameter1, parameter2, parameter3, parameter4, parameter5, parameter6, parameter7, parameter8, parameter9, parameter10);
}




/// A function with no parameters.
pub fn another_function(){
    println!("{}", String::from("Hello, World!"));
}

pub fn run() -> serde_json::Result<()> {
    example_function(1,2)?;
    example_function_many_parameters(1, 2,3, 4,5,6, 7, 8, 9,10);
    another_function();
    Ok(())
}
