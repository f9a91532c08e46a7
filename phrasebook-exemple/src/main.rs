use std::path::Path;

use phrasebook_core::{Phrasebook, PhrasebookConfig};

const CORPUS_PATH: &str = "./data/corpus.txt";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Keys of 2 words, table persisted between runs
    let config = PhrasebookConfig {
        order: 2,
        storage_path: Some("./data/phrasebook.json".into()),
        ..Default::default()
    };
    let mut phrasebook = Phrasebook::from_config(&config)?;

    // Restore what previous runs learned (a missing file is fine)
    phrasebook.load()?;

    // Optionally learn a whole corpus, one utterance per line, in parallel
    if Path::new(CORPUS_PATH).exists() {
        let lines = phrasebook.learn_corpus(CORPUS_PATH)?;
        println!("Learned {} lines from {}", lines, CORPUS_PATH);
    }

    // Learn a few sentences by hand
    phrasebook.learn("the quick brown fox jumps over the lazy dog");
    phrasebook.learn("the lazy dog sleeps all day long");
    phrasebook.learn("a quick brown cat jumps over the fence");

    // Too short for order 2 (needs at least 2 words): silently ignored
    phrasebook.learn("hi");

    println!("{} keys learned", phrasebook.table().len());

    // Generate 10 phrases, each walking at most `max_phrase_length` steps
    for i in 0..10 {
        println!("Generated phrase {}: {}", i + 1, phrasebook.generate(config.max_phrase_length));
    }

    // Persist for the next run
    phrasebook.dump()?;

    Ok(())
}
