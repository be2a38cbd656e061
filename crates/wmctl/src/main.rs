// Файл: crates/wmctl/src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};

use wordmask_store::query::{self, SearchParams};
use wordmask_store::reconcile::{self, DomainEntry, FilterChange, SessionState};
use wordmask_store::storejson::JsonStoreWriter;
use wordmask_store::wordlist::read_words;
use wordmask_store::WordStoreWriter;

#[derive(Parser)]
#[command(version, about = "Wordmask control: build/search word store")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Построить хранилище из текстового списка слов (по слову на строке)
    BuildStore {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Поиск по шаблону: '*' — любая последовательность, '?' — один символ
    Search {
        #[arg(long)]
        store: String,
        #[arg(long)]
        q: String,
        #[arg(long)]
        len: Option<u32>,
        #[arg(long)]
        max_vowels: Option<u32>,
        #[arg(long, default_value_t = 1000)]
        limit: usize,
    },
    /// Домены фильтров для шаблона и, опционально, одного активного фильтра
    Filters {
        #[arg(long)]
        store: String,
        #[arg(long)]
        q: String,
        #[arg(long)]
        len: Option<u32>,
        #[arg(long)]
        max_vowels: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::BuildStore { input, out } => {
            let words = read_words(&input)?;
            let mut w = JsonStoreWriter::default();
            let appended = w.write_store(&words, &out)?;
            println!("добавлено слов: {appended}");
        }
        Cmd::Search {
            store,
            q,
            len,
            max_vowels,
            limit,
        } => {
            let params = SearchParams {
                pattern: q,
                length: len,
                max_vowels,
                limit,
            };
            let words = query::search(&store, &params)?;
            for w in &words {
                println!("{w}");
            }
            eprintln!("найдено слов: {}", words.len());
        }
        Cmd::Filters {
            store,
            q,
            len,
            max_vowels,
        } => {
            // Сначала домены от шаблона, затем одно уточнение, если задано
            let first = reconcile::reconcile(&store, &SessionState::default(), FilterChange::Pattern(q))?;
            let out = match (len, max_vowels) {
                (Some(v), _) => {
                    reconcile::reconcile(&store, &first.state, FilterChange::Length(Some(v)))?
                }
                (None, Some(v)) => {
                    reconcile::reconcile(&store, &first.state, FilterChange::MaxVowels(Some(v)))?
                }
                (None, None) => first,
            };
            println!("длина слова: {}", labels(&out.length_domain));
            println!("макс. гласных: {}", labels(&out.vowel_domain));
        }
    }
    Ok(())
}

fn labels(domain: &[DomainEntry]) -> String {
    domain
        .iter()
        .map(|e| e.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
