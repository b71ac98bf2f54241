use std::env;
use std::fs;
use std::process;

use copedant::{
    export_chords, import_chords, prune_redundant, to_json, ChordFormulas, ChordGenerator, Fretboard,
    InstrumentConfig, InstrumentPreset, PedalCombination, PitchClass, Spelling,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: copedant chords <key> [--preset P | --config FILE] [--prune] [--output FILE]
       copedant scale <key> [--preset P | --config FILE] [--pedals A,F]
       copedant import <FILE> <key> [--preset P | --config FILE]

Presets: e9 (default), open-e, guitar-standard";

struct Options {
    positional: Vec<String>,
    preset: Option<String>,
    config: Option<String>,
    output: Option<String>,
    pedals: Vec<String>,
    prune: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        positional: Vec::new(),
        preset: None,
        config: None,
        output: None,
        pedals: Vec::new(),
        prune: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| -> String {
            iter.next()
                .cloned()
                .unwrap_or_else(|| fail(&format!("Missing value for {}\n\n{}", flag, USAGE)))
        };
        match arg.as_str() {
            "--preset" => options.preset = Some(value("--preset")),
            "--config" => options.config = Some(value("--config")),
            "--output" | "-o" => options.output = Some(value("--output")),
            "--pedals" => {
                options.pedals = value("--pedals")
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "--prune" => options.prune = true,
            flag if flag.starts_with("--") => fail(&format!("Unknown option {}\n\n{}", flag, USAGE)),
            _ => options.positional.push(arg.clone()),
        }
    }

    options
}

/// Fretboard and chord table from --config, --preset, or the E9 default.
fn load_instrument(options: &Options) -> (Fretboard, ChordFormulas) {
    if let Some(path) = &options.config {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", path, e)));
        let config = InstrumentConfig::from_yaml(&content)
            .unwrap_or_else(|e| fail(&format!("Error in '{}': {}", path, e)));
        tracing::info!("Loaded instrument from {}", path);
        return (config.fretboard, config.formulas);
    }

    let name = options.preset.as_deref().unwrap_or("e9");
    let preset: InstrumentPreset = name
        .parse()
        .unwrap_or_else(|e| fail(&format!("{}\n\n{}", e, USAGE)));
    (preset.fretboard(), ChordFormulas::standard())
}

fn parse_key(name: &str) -> PitchClass {
    PitchClass::from_name(name).unwrap_or_else(|e| fail(&e.to_string()))
}

fn write_output(path: Option<&String>, content: &str) {
    match path {
        Some(path) => {
            if let Err(e) = fs::write(path, content) {
                fail(&format!("Error writing to '{}': {}", path, e));
            }
            tracing::info!("Wrote {}", path);
        }
        None => println!("{}", content),
    }
}

fn run_chords(options: &Options) {
    let [key] = options.positional.as_slice() else {
        fail(USAGE)
    };
    let key = parse_key(key);
    let (fretboard, formulas) = load_instrument(options);

    let mut book = ChordGenerator::new(&fretboard)
        .generate_chords(&formulas, key)
        .unwrap_or_else(|e| fail(&format!("Generation error: {}", e)));

    if options.prune {
        book = book
            .into_chords()
            .into_iter()
            .map(|mut chord| {
                chord.voicings = prune_redundant(chord.voicings);
                chord
            })
            .collect();
    }

    let total: usize = book.iter().map(|c| c.voicings.len()).sum();
    tracing::info!("Generated {} voicings for {} chord types in {}", total, book.len(), key);

    let json = export_chords(&book, &fretboard)
        .and_then(|sheet| to_json(&sheet))
        .unwrap_or_else(|e| fail(&format!("Export error: {}", e)));
    write_output(options.output.as_ref(), &json);
}

fn run_scale(options: &Options) {
    let [key] = options.positional.as_slice() else {
        fail(USAGE)
    };
    let key = parse_key(key);
    let (fretboard, _) = load_instrument(options);

    let grid = fretboard.major_scale(key, 0, 12);
    let combination = PedalCombination::from_names(&options.pedals);
    let names = fretboard
        .to_interval_names(key, &grid, (!combination.is_empty()).then_some(&combination))
        .unwrap_or_else(|e| fail(&e.to_string()));

    // highest string on top, as seen from the player's seat
    let tuning = fretboard.tuning_names(Spelling::Sharps);
    let mut out = String::new();
    for (open, row) in tuning.iter().zip(&names).rev() {
        out.push_str(&format!("{:>2} |", open));
        for cell in row {
            out.push_str(&format!("{:^4}|", cell.unwrap_or("")));
        }
        out.push('\n');
    }
    write_output(options.output.as_ref(), out.trim_end());
}

fn run_import(options: &Options) {
    let [path, key] = options.positional.as_slice() else {
        fail(USAGE)
    };
    let key = parse_key(key);
    let (fretboard, _) = load_instrument(options);

    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", path, e)));
    let chords = import_chords(&json, key, &fretboard)
        .unwrap_or_else(|e| fail(&format!("Import error: {}", e)));

    for chord in &chords {
        println!("{}{}: {} voicings", key, chord.chord_type, chord.voicings.len());
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("copedant=info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        fail(USAGE)
    };
    let options = parse_options(rest);

    match command.as_str() {
        "chords" => run_chords(&options),
        "scale" => run_scale(&options),
        "import" => run_import(&options),
        "--help" | "-h" | "help" => println!("{}", USAGE),
        other => fail(&format!("Unknown command: {}\n\n{}", other, USAGE)),
    }
}
