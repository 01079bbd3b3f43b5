//! The `vitrine lang` command: show or change the interface language.

use anyhow::Result;

use vitrine_core::preferences::{FileStore, Language, Preferences};

use crate::config::VitrineConfig;

pub enum LangAction {
    Show,
    Set(Language),
    Toggle,
}

pub fn execute(config: &VitrineConfig, action: LangAction) -> Result<()> {
    let mut prefs = Preferences::open(FileStore::new(config.preferences_file()));
    let language = match action {
        LangAction::Show => prefs.language(),
        LangAction::Set(language) => {
            prefs.set(language)?;
            language
        }
        LangAction::Toggle => prefs.toggle()?,
    };
    println!("{}", language.code().to_uppercase());
    Ok(())
}
