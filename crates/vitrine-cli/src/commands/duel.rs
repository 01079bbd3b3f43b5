//! The `vitrine duel` command: pairwise Elo ranking of catalog items.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::Rng;

use vitrine_core::catalog::ContentKind;
use vitrine_core::engine::QuizEngine;
use vitrine_core::ranking::{PairwiseRanking, RankingEvent, Side};
use vitrine_core::report::{to_json, RankingOutcome};

use crate::commands::{messages, open_data, read_command, session_output, session_rng};
use crate::config::VitrineConfig;
use crate::messages::Messages;

pub struct DuelArgs {
    pub kind: String,
    pub category: Option<String>,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn execute(config: &VitrineConfig, args: DuelArgs) -> Result<()> {
    let kind: ContentKind = args.kind.parse()?;
    let data = open_data(config)?;
    let entities = data
        .gallery(kind)?
        .ranking_entities(args.category.as_deref());

    let mut ranking_config = config.ranking_config();
    if let Some(rounds) = args.rounds {
        ranking_config.max_rounds = rounds;
    }
    let mut ranking =
        PairwiseRanking::with_rng(entities, ranking_config, session_rng(args.seed))
            .with_context(|| format!("cannot start a {kind} duel"))?;
    let msgs = messages(config);

    let stdin = std::io::stdin();
    let mut output = session_output(args.json);
    let outcome = run_session(&mut ranking, &mut stdin.lock(), &mut output, msgs)?;

    if args.json {
        println!("{}", to_json(&outcome)?);
    } else {
        print_outcome(&outcome, &mut output, msgs)?;
    }
    Ok(())
}

/// Present pairs until every round is played, the user quits, or
/// input ends.
pub fn run_session<G: Rng, R: BufRead, W: Write>(
    ranking: &mut PairwiseRanking<G>,
    input: &mut R,
    output: &mut W,
    msgs: &Messages,
) -> Result<RankingOutcome> {
    writeln!(output, "{}", msgs.duel_title)?;
    writeln!(output, "{}", msgs.duel_help)?;

    while !ranking.is_finished() {
        if let Some((left, right)) = ranking.current_pair() {
            writeln!(
                output,
                "\n{} {}/{}",
                msgs.round,
                ranking.round(),
                ranking.config().max_rounds
            )?;
            writeln!(output, "  1) {}", left.name())?;
            writeln!(output, "  2) {}", right.name())?;
        }

        let Some(command) = read_command(input, output)? else {
            writeln!(output, "{}", msgs.session_ended)?;
            break;
        };
        match command.to_ascii_lowercase().as_str() {
            "q" => break,
            "r" => ranking.dispatch(RankingEvent::Reset),
            "1" => ranking.dispatch(RankingEvent::ChooseSide(Side::Left)),
            "2" => ranking.dispatch(RankingEvent::ChooseSide(Side::Right)),
            _ => writeln!(output, "{}", msgs.invalid_input)?,
        }
    }

    Ok(RankingOutcome::from_ranking(ranking))
}

fn print_outcome<W: Write>(
    outcome: &RankingOutcome,
    output: &mut W,
    msgs: &Messages,
) -> Result<()> {
    if !outcome.finished {
        return Ok(());
    }
    if let Some(champion) = &outcome.champion {
        writeln!(output, "\n{}: {} ({})", msgs.champion, champion.name, champion.rating)?;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Rating"]);
    for standing in &outcome.standings {
        table.add_row(vec![
            Cell::new(standing.rank),
            Cell::new(&standing.name),
            Cell::new(standing.rating),
        ]);
    }
    writeln!(output, "\n{table}")?;
    Ok(())
}
