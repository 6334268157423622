use clap::{Arg, ArgAction, Command};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use lingua_flow::translate::validate_language;
use lingua_flow::{
    DEFAULT_API_URL, DEFAULT_HISTORY_CAP, DictionaryCollection, LingvaProvider, MockMode,
    MockTranslator, OutputState, PracticeDirection, PracticeSession, Storage,
    TRANSLATION_FAILED_MESSAGE, TranslationController, TranslationDirection, TranslationHistory,
    Translator, WordPair,
};

fn direction_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("from")
                .long("from")
                .short('f')
                .help("Source language code")
                .default_value("ru"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .help("Target language code")
                .default_value("en"),
        )
}

fn mock_arg(command: Command) -> Command {
    command.arg(
        Arg::new("mock")
            .long("mock")
            .short('m')
            .help("Use the mock translator instead of the Lingva API")
            .action(ArgAction::SetTrue),
    )
}

fn cli() -> Command {
    Command::new("lingua-flow")
        .version("0.1.0")
        .about("Word and phrase translator with personal dictionaries and flashcard practice")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .help("Data directory for dictionaries and history (env: LINGUA_FLOW_DATA_DIR)"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Base URL of the Lingva API instance (env: LINGVA_API_URL)"),
        )
        .subcommand(mock_arg(direction_args(
            Command::new("translate")
                .about("Translate a word or phrase once")
                .arg(Arg::new("text").help("Text to translate").required(true).index(1)),
        )))
        .subcommand(mock_arg(direction_args(
            Command::new("interactive")
                .about("Line-based translator: type to translate, :help for commands"),
        )))
        .subcommand(Command::new("languages").about("List supported languages"))
        .subcommand(Command::new("history").about("Show the translation history"))
        .subcommand(Command::new("dictionaries").about("List dictionaries"))
        .subcommand(
            Command::new("dictionary")
                .about("Show one dictionary's words")
                .arg(Arg::new("name").help("Dictionary name").required(true).index(1)),
        )
        .subcommand(direction_args(
            Command::new("create-dictionary")
                .about("Create a new dictionary")
                .arg(Arg::new("name").help("Dictionary name").required(true).index(1))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Dictionary description")
                        .default_value(""),
                ),
        ))
        .subcommand(
            Command::new("delete-dictionary")
                .about("Delete a dictionary")
                .arg(Arg::new("name").help("Dictionary name").required(true).index(1)),
        )
        .subcommand(
            Command::new("add-word")
                .about("Add a word pair to a dictionary")
                .arg(Arg::new("dictionary").help("Dictionary name").required(true).index(1))
                .arg(Arg::new("original").help("Original text").required(true).index(2))
                .arg(Arg::new("translation").help("Translated text").required(true).index(3)),
        )
        .subcommand(
            Command::new("remove-word")
                .about("Remove a word pair from a dictionary")
                .arg(Arg::new("dictionary").help("Dictionary name").required(true).index(1))
                .arg(Arg::new("original").help("Original text").required(true).index(2))
                .arg(Arg::new("translation").help("Translated text").required(true).index(3)),
        )
        .subcommand(
            Command::new("practice")
                .about("Run a flashcard session over a dictionary")
                .arg(Arg::new("dictionary").help("Dictionary name").required(true).index(1))
                .arg(
                    Arg::new("reverse")
                        .long("reverse")
                        .short('r')
                        .help("Show translations and recall originals")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warn".parse().unwrap()),
        )
        .init();

    let matches = cli().get_matches();

    let data_dir = matches
        .get_one::<String>("data-dir")
        .cloned()
        .or_else(|| std::env::var("LINGUA_FLOW_DATA_DIR").ok())
        .unwrap_or_else(|| ".lingua-flow".to_string());
    let storage = Storage::new(&data_dir);

    let api_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .or_else(|| std::env::var("LINGVA_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    match matches.subcommand() {
        Some(("translate", sub)) => run_translate(sub, &storage, &api_url).await,
        Some(("interactive", sub)) => run_interactive(sub, &storage, &api_url).await,
        Some(("languages", _)) => run_languages(&api_url).await,
        Some(("history", _)) => run_history(&storage),
        Some(("dictionaries", _)) => run_dictionaries(&storage),
        Some(("dictionary", sub)) => run_dictionary(sub, &storage),
        Some(("create-dictionary", sub)) => run_create_dictionary(sub, &storage),
        Some(("delete-dictionary", sub)) => run_delete_dictionary(sub, &storage),
        Some(("add-word", sub)) => run_word_edit(sub, &storage, true),
        Some(("remove-word", sub)) => run_word_edit(sub, &storage, false),
        Some(("practice", sub)) => run_practice(sub, &storage).await,
        _ => unreachable!("subcommand required"),
    }
}

fn make_translator(
    mock: bool,
    api_url: &str,
) -> Result<Arc<dyn Translator>, Box<dyn std::error::Error>> {
    if mock {
        Ok(Arc::new(MockTranslator::new(MockMode::Suffix)))
    } else {
        Ok(Arc::new(LingvaProvider::with_base_url(api_url)?))
    }
}

fn sub_direction(sub: &clap::ArgMatches) -> TranslationDirection {
    TranslationDirection::new(
        sub.get_one::<String>("from").unwrap(),
        sub.get_one::<String>("to").unwrap(),
    )
}

async fn run_translate(
    sub: &clap::ArgMatches,
    storage: &Storage,
    api_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = sub.get_one::<String>("text").unwrap();
    let direction = sub_direction(sub);
    let translator = make_translator(sub.get_flag("mock"), api_url)?;

    match translator
        .translate(text, &direction.from, &direction.to)
        .await
    {
        Ok(translation) => {
            println!("{}", translation);
            let mut history = TranslationHistory::load(storage, DEFAULT_HISTORY_CAP);
            history.record(text, &translation, &direction);
            history.persist(storage)?;
            Ok(())
        }
        Err(error) => {
            eprintln!("❌ {}", TRANSLATION_FAILED_MESSAGE);
            Err(error.into())
        }
    }
}

async fn run_interactive(
    sub: &clap::ArgMatches,
    storage: &Storage,
    api_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let translator = make_translator(sub.get_flag("mock"), api_url)?;
    let direction = sub_direction(sub);
    let controller = TranslationController::new(translator, direction.clone());
    controller
        .preload_history(TranslationHistory::load(storage, DEFAULT_HISTORY_CAP).into_entries())
        .await;

    println!("Interactive translator ({}). Type to translate.", direction);
    print_command_help();

    let mut collection = DictionaryCollection::load(storage);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut output = controller.subscribe();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_string();
                if let Some(command) = line.strip_prefix(':') {
                    if run_command(command, &controller, &mut collection, storage).await? {
                        break;
                    }
                } else {
                    controller.set_input(&line).await;
                }
            }
            changed = output.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = output.borrow_and_update().clone();
                match state {
                    OutputState::Loading => println!("…"),
                    OutputState::Translated(text) => {
                        println!("→ {}", text);
                        let snapshot = controller.history().await;
                        TranslationHistory::from_entries(snapshot, DEFAULT_HISTORY_CAP)
                            .persist(storage)?;
                    }
                    OutputState::Failed(message) => println!("⚠ {}", message),
                    OutputState::Empty => {}
                }
            }
        }
    }

    controller.close().await;
    Ok(())
}

fn print_command_help() {
    println!(
        "Commands: :swap, :from <code>, :to <code>, :save <dictionary>, :history, :clear, :quit"
    );
}

/// Handle one `:command` line. Returns `true` when the session should end.
async fn run_command(
    command: &str,
    controller: &TranslationController,
    collection: &mut DictionaryCollection,
    storage: &Storage,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut parts = command.splitn(2, ' ');
    let verb = parts.next().unwrap_or_default();
    let argument = parts.next().unwrap_or("").trim();

    match verb {
        "quit" | "q" => return Ok(true),
        "swap" => {
            controller.swap_direction().await;
            println!("Direction: {}", controller.direction().await);
        }
        "from" | "to" => {
            if let Err(error) = validate_language(argument) {
                println!("{}", error);
                return Ok(false);
            }
            let mut direction = controller.direction().await;
            if verb == "from" {
                direction.from = argument.to_string();
            } else {
                direction.to = argument.to_string();
            }
            println!("Direction: {}", direction);
            controller.set_direction(direction).await;
        }
        "clear" => controller.set_input("").await,
        "history" => {
            let history = controller.history().await;
            if history.is_empty() {
                println!("History is empty.");
            }
            for entry in history {
                println!("[{}] {} → {}", entry.direction, entry.input, entry.output);
            }
        }
        "save" => {
            let input = controller.input().await;
            let OutputState::Translated(translation) = controller.output() else {
                println!("Nothing translated to save yet.");
                return Ok(false);
            };
            let Some(id) = collection.get_by_name(argument).map(|d| d.id) else {
                println!("Dictionary '{}' not found.", argument);
                return Ok(false);
            };
            if collection.add_word(id, WordPair::new(input.trim(), &translation), storage)? {
                println!("✅ Saved to '{}'.", argument);
            } else {
                println!("Already in '{}'.", argument);
            }
        }
        _ => print_command_help(),
    }
    Ok(false)
}

async fn run_languages(api_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let provider = LingvaProvider::with_base_url(api_url)?;
    let languages = provider.languages_or_fallback().await;
    for language in &languages {
        println!("{:<8} {}", language.code, language.name);
    }
    Ok(())
}

fn run_history(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let history = TranslationHistory::load(storage, DEFAULT_HISTORY_CAP);
    if history.is_empty() {
        println!("History is empty.");
        return Ok(());
    }
    for entry in history.entries() {
        println!("[{}] {} → {}", entry.direction, entry.input, entry.output);
    }
    Ok(())
}

fn run_dictionaries(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let collection = DictionaryCollection::load(storage);
    for dictionary in collection.iter() {
        println!(
            "{} ({}, {} words)",
            dictionary.name,
            dictionary.direction,
            dictionary.words.len()
        );
        if !dictionary.description.is_empty() {
            println!("    {}", dictionary.description);
        }
    }
    Ok(())
}

fn run_dictionary(
    sub: &clap::ArgMatches,
    storage: &Storage,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("name").unwrap();
    let collection = DictionaryCollection::load(storage);
    let Some(dictionary) = collection.get_by_name(name) else {
        println!("Dictionary '{}' not found.", name);
        return Ok(());
    };

    println!("{} ({})", dictionary.name, dictionary.direction);
    if !dictionary.description.is_empty() {
        println!("{}", dictionary.description);
    }
    if dictionary.words.is_empty() {
        println!("(no words yet)");
    }
    for pair in &dictionary.words {
        println!("  {} — {}", pair.original, pair.translation);
    }
    Ok(())
}

fn run_create_dictionary(
    sub: &clap::ArgMatches,
    storage: &Storage,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("name").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let mut collection = DictionaryCollection::load(storage);
    collection.create(name, description, sub_direction(sub), storage)?;
    println!("✅ Created dictionary '{}'.", name);
    Ok(())
}

fn run_delete_dictionary(
    sub: &clap::ArgMatches,
    storage: &Storage,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("name").unwrap();
    let mut collection = DictionaryCollection::load(storage);
    let Some(id) = collection.get_by_name(name).map(|d| d.id) else {
        println!("Dictionary '{}' not found.", name);
        return Ok(());
    };
    collection.delete(id, storage)?;
    println!("✅ Deleted dictionary '{}'.", name);
    Ok(())
}

fn run_word_edit(
    sub: &clap::ArgMatches,
    storage: &Storage,
    add: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("dictionary").unwrap();
    let pair = WordPair::new(
        sub.get_one::<String>("original").unwrap(),
        sub.get_one::<String>("translation").unwrap(),
    );

    let mut collection = DictionaryCollection::load(storage);
    let Some(id) = collection.get_by_name(name).map(|d| d.id) else {
        println!("Dictionary '{}' not found.", name);
        return Ok(());
    };

    if add {
        if collection.add_word(id, pair, storage)? {
            println!("✅ Added to '{}'.", name);
        } else {
            println!("Already in '{}', nothing to do.", name);
        }
    } else if collection.remove_word(id, &pair, storage)? {
        println!("✅ Removed from '{}'.", name);
    } else {
        println!("Not in '{}', nothing to do.", name);
    }
    Ok(())
}

async fn run_practice(
    sub: &clap::ArgMatches,
    storage: &Storage,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("dictionary").unwrap();
    let collection = DictionaryCollection::load(storage);
    let Some(dictionary) = collection.get_by_name(name) else {
        println!("Dictionary '{}' not found.", name);
        return Ok(());
    };

    let direction = if sub.get_flag("reverse") {
        PracticeDirection::Reverse
    } else {
        PracticeDirection::Forward
    };
    let mut session = PracticeSession::start(&dictionary.words, direction);

    if session.is_finished() {
        println!("'{}' has no words to practice.", dictionary.name);
        return Ok(());
    }

    println!(
        "Practicing '{}' — {} cards. Enter reveals, y = remembered, n = forgot, q = quit.",
        dictionary.name,
        session.total()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !session.is_finished() {
        if !session.revealed() {
            let (position, total) = session.progress();
            println!();
            println!(
                "[{}/{}] {}",
                position,
                total,
                session.prompt().unwrap_or_default()
            );
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().eq_ignore_ascii_case("q") {
                break;
            }
            session.toggle_reveal();
            println!("    = {}", session.answer().unwrap_or_default());
            println!("    Remembered? (y/n)");
        } else {
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match line.trim().to_lowercase().as_str() {
                "y" => {
                    session.judge(true);
                }
                "n" => {
                    session.judge(false);
                }
                "q" => break,
                _ => println!("    y = remembered, n = forgot, q = quit"),
            }
        }
    }

    if session.is_finished() {
        println!();
        println!(
            "✅ Finished: {} remembered, {} to review.",
            session.remembered().len(),
            session.not_remembered().len()
        );
        if !session.not_remembered().is_empty() {
            println!("Worth another look:");
            for pair in session.not_remembered() {
                println!("  {} — {}", pair.original, pair.translation);
            }
        }
    } else {
        println!();
        println!("Session exited; the dictionary is untouched.");
    }
    Ok(())
}
