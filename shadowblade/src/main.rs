//! Shadowblade command line.
//!
//! ```bash
//! shadowblade attack The Colossus of a Thousand Patches
//! shadowblade --seed 7 --json attack Hype
//! shadowblade --list
//! shadowblade            # interactive, one command per line
//! ```

mod repl;

use anyhow::{bail, Context, Result};
use armory_core::{
    AgentCard, ArmoryConfig, Catalog, ClaudeAdvisor, ClaudeExtractor, Command, Dispatcher,
    Engagement,
};
use claude::Claude;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.help {
        print_help();
        return Ok(());
    }

    let config = options.apply(ArmoryConfig::from_env()?);

    if options.list {
        print_catalog(&Catalog::armory(), options.json)?;
        return Ok(());
    }

    if options.card {
        let card = AgentCard::shadowblade(config.public_url.clone());
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    let dispatcher = build_dispatcher(&config)?;

    if options.command.is_empty() {
        return repl::run(&dispatcher, options.json).await;
    }

    let engagement = dispatcher
        .engage(&Command::new(options.command.join(" ")))
        .await?;
    print_engagement(&engagement, options.json)
}

/// Flags and the one-shot command from the command line.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    help: bool,
    list: bool,
    card: bool,
    json: bool,
    llm: bool,
    seed: Option<u64>,
    model: Option<String>,
    command: Vec<String>,
}

impl CliOptions {
    /// Flags override whatever the environment configured.
    fn apply(&self, mut config: ArmoryConfig) -> ArmoryConfig {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.llm {
            config = config.with_llm(true);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        config
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => options.help = true,
            "--list" => options.list = true,
            "--card" => options.card = true,
            "--json" => options.json = true,
            "--llm" => options.llm = true,
            "--seed" => {
                let Some(value) = args.get(i + 1) else {
                    bail!("--seed needs a value");
                };
                let seed = value
                    .parse()
                    .with_context(|| format!("--seed expects an unsigned integer, got {value:?}"))?;
                options.seed = Some(seed);
                i += 1;
            }
            "--model" => {
                let Some(value) = args.get(i + 1) else {
                    bail!("--model needs a value");
                };
                options.model = Some(value.clone());
                i += 1;
            }
            "--" => {
                options.command.extend(args[i + 1..].iter().cloned());
                break;
            }
            flag if flag.starts_with("--") && options.command.is_empty() => {
                bail!("unknown option {flag}; try --help");
            }
            word => options.command.push(word.to_string()),
        }
        i += 1;
    }

    Ok(options)
}

fn build_dispatcher(config: &ArmoryConfig) -> Result<Dispatcher> {
    let rng = config.rng().context("could not seed the random source")?;
    let dispatcher = Dispatcher::new(Catalog::armory(), rng);

    if !config.use_llm {
        return Ok(dispatcher);
    }

    let client = Claude::from_env().context("model targeting needs ANTHROPIC_API_KEY")?;
    tracing::info!(model = client.model(), "model targeting enabled");
    Ok(dispatcher
        .with_extractor(ClaudeExtractor::new(client.clone(), config))
        .with_advisor(ClaudeAdvisor::new(client, config)))
}

pub(crate) fn print_engagement(engagement: &Engagement, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(engagement)?);
    } else {
        println!("{}", engagement.summary());
    }
    Ok(())
}

pub(crate) fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.weapons())?);
        return Ok(());
    }

    for weapon in catalog.iter() {
        println!(
            "{:<34} {} [{}] damage {} crit {}",
            weapon.name, weapon.title, weapon.damage_type, weapon.damage, weapon.crit
        );
        if !weapon.counters.is_empty() {
            println!("{:<34} counters: {}", "", weapon.counters.join("; "));
        }
    }
    Ok(())
}

fn print_help() {
    println!("Shadowblade - combat agent that answers each order with one weapon strike");
    println!();
    println!("USAGE:");
    println!("  shadowblade [OPTIONS] [COMMAND...]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help    Show this help message");
    println!("  --list        List the armory and exit");
    println!("  --card        Print the agent card as JSON and exit");
    println!("  --json        Print engagements as JSON instead of a summary");
    println!("  --seed <N>    Seed the random source for repeatable strikes");
    println!("  --llm         Use Claude for targeting (needs ANTHROPIC_API_KEY)");
    println!("  --model <ID>  Claude model for --llm targeting");
    println!();
    println!("ENVIRONMENT:");
    println!("  ARMORY_MODEL, ARMORY_MAX_TOKENS, ARMORY_TEMPERATURE, ARMORY_SEED,");
    println!("  ARMORY_USE_LLM, PUBLIC_URL, ANTHROPIC_API_KEY, RUST_LOG");
    println!();
    println!("Without a COMMAND, reads one order per line from stdin.");
    println!();
    println!("EXAMPLES:");
    println!("  shadowblade attack The Colossus of a Thousand Patches");
    println!("  shadowblade --seed 7 --json attack Hype");
}
