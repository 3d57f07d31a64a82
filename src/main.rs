use std::{
    io::{
        self,
        BufRead,
    },
    sync::Arc,
};

use lexmine::{
    core::{
        QuizMode,
        ReviewScope,
    },
    persistence::{
        get_app_data_dir,
        PersistenceLayer,
    },
    reminder::Notifier,
    service::WordTrainer,
};

fn parse_mode(token: &str) -> Option<QuizMode> {
    match token {
        "1" => Some(QuizMode::EnToCn),
        "2" => Some(QuizMode::CnToEn),
        _ => None,
    }
}

fn parse_scope(token: &str) -> Option<ReviewScope> {
    match token {
        "1" => Some(ReviewScope::LatestGroup),
        "2" => Some(ReviewScope::RandomHistory),
        date if date.len() == 10 && date.chars().filter(|c| *c == '-').count() == 2 => {
            Some(ReviewScope::Group(date.to_string()))
        }
        _ => None,
    }
}

fn dispatch(trainer: &WordTrainer, command: &str, args: &[&str]) -> String {
    match command {
        "add-words" => {
            let count = args.first().and_then(|a| a.parse().ok()).unwrap_or(10);
            trainer.add_words(count).unwrap_or_else(|e| e.to_string())
        }
        "review" => {
            let mode = args.first().copied().and_then(parse_mode);
            let scope = args.get(1).copied().and_then(parse_scope);
            match (mode, scope) {
                (Some(mode), Some(scope)) => {
                    trainer.review(mode, scope).unwrap_or_else(|e| e.to_string())
                }
                _ => "Usage: review <mode 1|2> <type 1|2|YYYY-MM-DD>".to_string(),
            }
        }
        "verify" => {
            let answers: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            trainer.verify(&answers).unwrap_or_else(|e| e.to_string())
        }
        "switch-deck" => match args.first() {
            Some(&"list") => trainer.list_decks(),
            Some(name) => trainer.switch_deck(name).unwrap_or_else(|e| e.to_string()),
            None => "Usage: switch-deck <name|list>".to_string(),
        },
        "clear" => trainer.clear().unwrap_or_else(|e| e.to_string()),
        "set-timer" => match args.is_empty() {
            true => "Usage: set-timer <interval-spec|cancel>".to_string(),
            false => trainer.set_timer(&args.join(" ")),
        },
        "help" => trainer.help().to_string(),
        other => format!("Unknown command '{}'. Try help.", other),
    }
}

fn main() {
    env_logger::init();

    let notifier: Notifier = Arc::new(|message| {
        println!("[reminder] {}", message);
        Ok(())
    });

    let trainer =
        WordTrainer::init(get_app_data_dir().join("decks"), PersistenceLayer::new(), notifier);

    println!("{}", trainer.help());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        if command == "quit" || command == "exit" {
            break;
        }

        let args: Vec<&str> = parts.collect();
        println!("{}", dispatch(&trainer, command, &args));
    }

    trainer.shutdown();
}
