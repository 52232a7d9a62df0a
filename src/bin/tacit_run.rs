//! Driver that executes a textual list of primitive calls against the
//! runtime, standing in for compiled code. One word per whitespace- or
//! semicolon-separated token, `push <n>` for literals, `#` starts a
//! comment. Exits 0 on normal termination, 1 on any fault with the
//! fault message on stderr, which makes it the harness the integration
//! tests drive.

use log::{debug, info};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;
use tacitrt::layout::MemoryLayout;
use tacitrt::runtime::{Machine, Runtime};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("tacit-run - execute a Tacit primitive trace against the runtime");
        println!();
        println!("Usage: {} <program.tac> [--layout layout.toml]", args[0]);
        println!();
        println!("The program is a whitespace- or semicolon-separated list of");
        println!("primitive names, with `push <n>` for literals and `#` comments.");
        return;
    }

    let program_path = &args[1];

    let mut layout = MemoryLayout::default();
    if args.len() >= 3 && args[2] == "--layout" {
        if args.len() < 4 {
            die("--layout requires a file operand");
        }
        let text = match fs::read_to_string(&args[3]) {
            Ok(text) => text,
            Err(e) => die(&format!("cannot read layout file '{}': {}", args[3], e)),
        };
        layout = match MemoryLayout::from_toml_str(&text) {
            Ok(layout) => layout,
            Err(fault) => die(&fault.to_string()),
        };
        info!("using layout from {}: {}", args[3], layout);
    }

    let source = match fs::read_to_string(program_path) {
        Ok(source) => source,
        Err(e) => die(&format!("cannot read program '{}': {}", program_path, e)),
    };

    let mut runtime = match Runtime::with_layout(layout) {
        Ok(runtime) => runtime,
        Err(fault) => die(&fault.to_string()),
    };

    debug!("executing {}", program_path);
    if let Err(message) = execute(&mut runtime.machine(), &source) {
        die(&message);
    }

    let _ = io::stdout().flush();
}

fn die(message: &str) -> ! {
    let _ = io::stdout().flush();
    eprintln!("{message}");
    process::exit(1);
}

fn execute(machine: &mut Machine<'_>, source: &str) -> Result<(), String> {
    let mut words = Vec::new();
    for line in source.lines() {
        let line = line.split('#').next().unwrap_or("");
        let line = line.replace(';', " ");
        words.extend(line.split_whitespace().map(str::to_owned));
    }

    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        debug!("word: {}", word);
        if word == "push" {
            let literal = iter
                .next()
                .ok_or_else(|| "push requires a literal operand".to_string())?;
            let value: i64 = literal
                .parse()
                .map_err(|_| format!("invalid literal: {literal}"))?;
            machine.push(value).map_err(|f| f.to_string())?;
        } else {
            step(machine, word)?;
        }
    }
    Ok(())
}

fn step(machine: &mut Machine<'_>, word: &str) -> Result<(), String> {
    let result = match word {
        "print-signed" => machine.print_signed(),
        "print-unsigned" => machine.print_unsigned(),
        "print-signed-field" => machine.print_signed_field(),
        "print-unsigned-field" => machine.print_unsigned_field(),
        "emit" => machine.emit(),
        "key" => machine.key(),
        "newline" => machine.newline(),
        "space" => machine.space(),
        "type" => machine.type_out(),
        "dup" => machine.dup(),
        "drop" => machine.drop_top(),
        "swap" => machine.swap(),
        "over" => machine.over(),
        "rot" => machine.rot(),
        "pick" => machine.pick(),
        "depth" => machine.depth(),
        "to-r" => machine.to_r(),
        "r-from" => machine.r_from(),
        "r-fetch" => machine.r_fetch(),
        "i" => machine.loop_i(),
        "j" => machine.loop_j(),
        "add" => machine.add(),
        "sub" => machine.sub(),
        "mul" => machine.mul(),
        "div" => machine.div(),
        "negate" => machine.negate(),
        "less-than" => machine.less_than(),
        "greater-than" => machine.greater_than(),
        "equal" => machine.equal(),
        "fetch" => machine.fetch(),
        "store" => machine.store(),
        "byte-fetch" => machine.byte_fetch(),
        "byte-store" => machine.byte_store(),
        _ => return Err(format!("unknown word: {word}")),
    };
    result.map_err(|f| f.to_string())
}
