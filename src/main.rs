use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use parity_net::data::parity::{self, Parity};
use parity_net::network::presets;
use parity_net::{Example, Network, Result, Topology, TrainConfig};

#[derive(Parser)]
#[command(name = "parity-net")]
#[command(version)]
#[command(about = "Linked-neuron classifier that learns whether a byte is even or odd")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the hand-wired detector, train it on every byte, evaluate again
    Demo,

    /// Train a freshly initialized network and report the cost per iteration
    Train {
        /// Training configuration (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Layer sizes (JSON); defaults to [8, 2]
        #[arg(short, long)]
        topology: Option<String>,

        /// Number of passes over the dataset; overrides the config
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Random seed for initialization and shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Labeled examples (JSON); defaults to all 256 bytes
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Write the 256-example parity dataset as JSON
    Dataset {
        /// Output file
        #[arg(short, long, default_value = "parity.json")]
        output: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo => demo(),
        Commands::Dataset { output } => {
            let data = parity::dataset();
            Example::save_all(&data, &output)?;
            log::info!("wrote {} examples to {output}", data.len());
            Ok(())
        }
        Commands::Train { config, topology, iterations, seed, data } => {
            let mut config = match config {
                Some(path) => TrainConfig::load_json(&path)?,
                None => TrainConfig::default(),
            };
            if let Some(n) = iterations {
                config.iterations = n;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            let topology = match topology {
                Some(path) => Topology::load_json(&path)?,
                None => Topology::default(),
            };
            let data = match data {
                Some(path) => Example::load_all(&path)?,
                None => parity::dataset(),
            };
            train(config, &topology, &data)
        }
    }
}

fn demo() -> Result<()> {
    let mut network = presets::parity_detector(&mut rand::thread_rng())?;
    println!("{network}");

    show(&mut network, &[62, 63, 65])?;
    let stats = network.train(&parity::dataset())?;
    println!(
        "Trained on {} minibatches, final step size {:.4}",
        stats.minibatches, stats.final_step_size
    );
    show(&mut network, &[62, 63, 65])
}

fn show(network: &mut Network, samples: &[u8]) -> Result<()> {
    for &n in samples {
        let output = network.evaluate(&parity::encode(n).input)?;
        println!("Testing {n}: {output:.4?} -> {}", Parity::from_output(&output));
        for raw in network.raw_output() {
            println!("  {raw:.4}");
        }
    }
    Ok(())
}

fn train(config: TrainConfig, topology: &Topology, data: &[Example]) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let iterations = config.iterations;
    let mut network = topology.build(&mut rng)?.with_config(config);
    println!("{network}");

    println!("Iteration 0: cost = {:.6}", network.evaluate_batch(data)?.cost);
    for iteration in 1..=iterations {
        network.train(data)?;
        println!("Iteration {iteration}: cost = {:.6}", network.cost()?);
    }

    let evaluation = network.evaluate_batch(data)?;
    let correct = evaluation.outputs.iter().zip(data)
        .filter(|(output, example)| Parity::from_output(output) == Parity::from_output(&example.target))
        .count();
    println!("Accuracy: {correct}/{}", data.len());
    Ok(())
}
