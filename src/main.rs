use std::env;
use std::process::ExitCode;

use vultc::errors::errors::Error;
use vultc::lexer::lexer::Lines;
use vultc::parser::parser::parse_file;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: vultc <file.vult>");
        return ExitCode::FAILURE;
    }

    let results = parse_file(&args[1]);

    match results.outcome {
        Ok(stmts) => {
            for stmt in stmts {
                println!("{}", stmt);
            }
            ExitCode::SUCCESS
        }
        Err(errors) => {
            for error in &errors {
                display_error(error, &results.lines, &results.file);
            }
            ExitCode::FAILURE
        }
    }
}

fn display_error(error: &Error, lines: &Lines, file: &str) {
    /*
        Error: Expecting a ';' but got 'val'
        -> final.vult
           |
        20 | val a = 1
           | --------^
    */

    println!("Error: {}", error);
    println!("-> {}", file);

    let loc = match error.loc() {
        Some(loc) => loc,
        None => return,
    };
    let line_text = match lines.line(loc.start.line) {
        Some(text) => text,
        None => return,
    };

    let line_str = loc.start.line.to_string();
    let padding = line_str.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = (loc.start.col as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
