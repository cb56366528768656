use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};
use notation::{
    ast::Notation,
    interpreter::{
        converter::core::{convert, convert_traced},
        evaluator::core::{Bindings, EvalMode, evaluate, evaluate_traced},
        lexer::{OperatorSet, to_text, tokenize},
        parser::core::build,
        render::render,
        trace::TraceEvent,
        value::core::Number,
    },
};

/// notation converts, evaluates and draws expressions written in infix,
/// prefix or postfix notation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Logs every operation to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrites an expression in another notation.
    Convert {
        /// Notation of the expression.
        #[arg(long)]
        from: Notation,

        /// Notation to convert to.
        #[arg(long)]
        to: Notation,

        /// Reads `~ & | ^ << >>` instead of `+ - * / ^`.
        #[arg(short, long)]
        bitwise: bool,

        /// Prints every stack operation before the result.
        #[arg(short, long)]
        trace: bool,

        /// The expression. A leading `-`, as in `-ab`, is read as part of it.
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Computes the value of an expression.
    Eval {
        /// Notation of the expression.
        #[arg(short, long, default_value = "infix")]
        notation: Notation,

        /// Number type and operators: int, real or bitwise.
        #[arg(short, long, default_value = "int")]
        mode: EvalMode,

        /// Binds a variable, for example `-s a=2`. May be repeated.
        #[arg(short = 's', long = "set", value_parser = parse_binding)]
        bindings: Vec<(char, Number)>,

        /// Prints every stack operation before the result.
        #[arg(short, long)]
        trace: bool,

        /// The expression. A leading `-`, as in `-ab`, is read as part of it.
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Draws the expression tree.
    Tree {
        /// Notation of the expression.
        #[arg(short, long, default_value = "infix")]
        notation: Notation,

        /// Reads `~ & | ^ << >>` instead of `+ - * / ^`.
        #[arg(short, long)]
        bitwise: bool,

        /// Also prints the preorder, inorder and postorder traversals.
        #[arg(long)]
        traversals: bool,

        /// The expression. A leading `-`, as in `-ab`, is read as part of it.
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

/// Parses a `name=value` pair.
fn parse_binding(text: &str) -> Result<(char, Number), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected name=value, found '{text}'"))?;

    let mut chars = name.trim().chars();
    let (Some(name), None) = (chars.next(), chars.next()) else {
        return Err(format!("'{name}' is not a single letter"));
    };

    Ok((name, value.parse()?))
}

const fn operator_set(bitwise: bool) -> OperatorSet {
    if bitwise {
        OperatorSet::Bitwise
    } else {
        OperatorSet::Arithmetic
    }
}

fn print_trace(steps: &[TraceEvent]) {
    for (index, step) in steps.iter().enumerate() {
        println!("{:>3}. {step}", index + 1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Convert { from,
                           to,
                           bitwise,
                           trace,
                           expression, } => {
            let tokens = tokenize(&expression, operator_set(bitwise))?;
            let converted = if trace {
                let mut steps = Vec::new();
                let converted = convert_traced(&tokens, from, to, &mut steps)?;
                print_trace(&steps);
                converted
            } else {
                convert(&tokens, from, to)?
            };
            println!("{}", to_text(&converted, to));
        },

        Command::Eval { notation,
                        mode,
                        bindings,
                        trace,
                        expression, } => {
            let bindings = Bindings::from_pairs(bindings)?;
            debug!("{} variables bound", bindings.len());

            let tokens = tokenize(&expression, mode.operators())?;
            let value = if trace {
                let mut steps = Vec::new();
                let value = evaluate_traced(&tokens, notation, &bindings, mode, &mut steps)?;
                print_trace(&steps);
                value
            } else {
                evaluate(&tokens, notation, &bindings, mode)?
            };
            println!("{value}");
        },

        Command::Tree { notation,
                        bitwise,
                        traversals,
                        expression, } => {
            let tokens = tokenize(&expression, operator_set(bitwise))?;
            let tree = build(&tokens, notation)?;

            for line in render(&tree)? {
                println!("{line}");
            }

            if traversals {
                for order in Notation::ALL {
                    println!("{order}: {}", to_text(&tree.to_tokens(order), order));
                }
            }
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    if let Err(e) = run(args.command) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
