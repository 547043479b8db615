use anyhow::{bail, Context, Result};
use clap::Parser;
use tapemachine::analyzer::findings;
use tapemachine::{
    Bit, Instance, Outcome, Program, ProgramInfo, ProgramManager, Tape, DEFAULT_MAX_STEPS,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The built-in program to execute
    #[clap(short, long, required_unless_present = "list")]
    program: Option<String>,

    /// Unary arguments placed on the tape, e.g. `-i 2 -i 3`
    #[clap(short, long, conflicts_with = "bits")]
    input: Vec<usize>,

    /// Raw tape contents as a string of 0s and 1s, starting at position 0
    #[clap(short, long)]
    bits: Option<String>,

    /// Stop after this many steps (0 runs until the machine halts)
    #[clap(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final machine state as JSON
    #[clap(long)]
    json: bool,

    /// Analyze the transition table before running
    #[clap(long)]
    check: bool,

    /// List the built-in programs
    #[clap(short, long)]
    list: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn parse_bits(bits: &str) -> Result<Tape> {
    let cells = bits
        .chars()
        .map(|c| {
            Bit::from_char(c)
                .map(bool::from)
                .with_context(|| format!("invalid tape symbol '{}' (expected 0 or 1)", c))
        })
        .collect::<Result<Vec<bool>>>()?;

    Ok(Tape::from_bits(&cells))
}

fn list_programs() -> Result<()> {
    for index in 0..ProgramManager::get_program_count() {
        let info = ProgramManager::get_program_info(index)
            .with_context(|| format!("failed to read program #{}", index))?;
        println!("{}", format_program_info(&info));
    }
    Ok(())
}

fn format_program_info(info: &ProgramInfo) -> String {
    format!(
        "{:<12} args: {}  states: {:<3} instructions: {:<3} {}",
        info.name, info.arity, info.state_count, info.instruction_count, info.description
    )
}

fn check_program(program: &Program) {
    for finding in findings(&program.table) {
        tracing::warn!(program = program.name, ?finding, "table analysis");
    }
}

fn execute(instance: &mut Instance, max_steps: usize, debug: bool) -> Result<Option<Outcome>> {
    if debug {
        println!("{}", instance.display());
        while !instance.is_halted() && (max_steps == 0 || instance.steps() < max_steps) {
            instance.step().context("machine failed")?;
            println!("{}", instance.display());
        }
        if instance.is_halted() {
            return Ok(Some(Outcome::Halted {
                steps: instance.steps(),
            }));
        }
        return Ok((max_steps > 0).then_some(Outcome::StepLimit {
            steps: instance.steps(),
        }));
    }

    if max_steps == 0 {
        instance.run().context("machine failed")?;
        return Ok(None);
    }

    instance
        .run_for(max_steps)
        .map(Some)
        .context("machine failed")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list {
        return list_programs();
    }

    let Some(name) = cli.program.as_deref() else {
        bail!("no program given");
    };
    let program = ProgramManager::get_program_by_name(name)
        .with_context(|| format!("failed to load program '{}'", name))?;

    if cli.check {
        check_program(&program);
    }

    let mut instance = match cli.bits.as_deref() {
        Some(bits) => Instance::new(program.table.clone(), &parse_bits(bits)?),
        None => program.instance(&cli.input),
    };

    let outcome = execute(&mut instance, cli.max_steps, cli.debug)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&instance.snapshot())
            .context("failed to serialize snapshot")?;
        println!("{}", json);
        return Ok(());
    }

    if let Some(Outcome::StepLimit { steps }) = outcome {
        println!("Machine did not halt within {} steps.", steps);
    } else if instance.is_halted() {
        println!("Machine halted after {} steps.", instance.steps());
    } else {
        println!("Machine stopped after {} steps.", instance.steps());
    }

    println!("{}", instance.display());
    println!(
        "values: {:?}  at head: {}",
        instance.all_values(),
        instance.value_at_head()
    );

    Ok(())
}
