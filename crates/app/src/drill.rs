use anyhow::Context;
use services::{DrillService, NextWord, Session, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{self, RecordView};

const HELP: &str =
    "[Enter] next word  [r] reset subsection  [R] reset section  [n] next subsection  [h] home  [q] quit";

enum Action {
    Next,
    ResetSubsection,
    ResetSection,
    NextSubsection,
    Home,
    Quit,
    Unknown,
}

impl Action {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Next,
            "r" => Self::ResetSubsection,
            "R" => Self::ResetSection,
            "n" => Self::NextSubsection,
            "h" => Self::Home,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Run the interactive word loop on stdin until the learner quits.
pub async fn run(service: &DrillService, section: &str, subsection: &str) -> anyhow::Result<()> {
    let mut session = service.start_session();
    service
        .select_subsection(&mut session, section, subsection)
        .with_context(|| format!("cannot drill `{section}` / `{subsection}`"))?;
    announce(service, &session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        match Action::parse(&line) {
            Action::Next => next_word(service, &mut session).await?,
            Action::ResetSubsection => {
                service.reset_current(&mut session)?;
                println!("Subsection progress reset.");
            }
            Action::ResetSection => {
                service.reset_section(&mut session)?;
                println!("Section progress reset.");
            }
            Action::NextSubsection => match service.recommended_next(&session) {
                Some(next) => {
                    service.select_subsection(&mut session, next.section(), next.subsection())?;
                    announce(service, &session);
                }
                None => println!("This is the last subsection of the section."),
            },
            Action::Home => {
                service.go_home(&mut session);
                print!("{}", render::CatalogView(service.catalog()));
                return Ok(());
            }
            Action::Quit => return Ok(()),
            Action::Unknown => {}
        }
        println!("{HELP}");
    }
    Ok(())
}

async fn next_word(service: &DrillService, session: &mut Session) -> anyhow::Result<()> {
    match service.next_word(session).await {
        Ok(NextWord::Generated(record)) => {
            println!("\n{}", RecordView(&record));
            print_progress(service, session);
        }
        Ok(NextWord::QuotaReached(stats)) => {
            println!("{}", render::completion(&stats));
            match service
                .recommended_next(session)
                .and_then(|key| service.catalog().by_key(&key))
            {
                Some((_, next)) => println!("Press [n] to continue with {}.", next.display_name()),
                None => println!("You've completed the last subsection of this section."),
            }
        }
        Ok(NextWord::Exhausted) => {
            println!("All words of this subsection have been used. Press [r] to practice again.");
        }
        Err(SessionError::Generation(err)) => {
            tracing::error!(error = %err, "word generation failed");
            println!("Could not generate content: {err}. Press Enter to try another word.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn announce(service: &DrillService, session: &Session) {
    let Some(key) = session.selection() else {
        return;
    };
    let catalog = session.catalog();
    if let Some((section, subsection)) = catalog.by_key(key) {
        println!("\n{} / {}", section.display_name(), subsection.display_name());
        println!("  {}", catalog.describe_subsection(key.section(), key.subsection()));
    }
    print_progress(service, session);
}

fn print_progress(service: &DrillService, session: &Session) {
    if let Some(progress) = service.subsection_progress(session) {
        println!("{}", render::subsection_line(&progress));
    }
    if let Some(progress) = service.section_progress(session) {
        println!("{}", render::section_line(&progress));
    }
}
