use colored::*;
use league_ingest::model::{LeagueEntry, LeagueListing, MatchInfo, SummonerProfile};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct EntryRow {
    queue: String,
    rank: String,
    #[tabled(rename = "LP")]
    league_points: String,
    record: String,
    series: String,
}

#[derive(Tabled)]
struct LadderRow {
    #[tabled(rename = "#")]
    number: String,
    summoner: String,
    #[tabled(rename = "LP")]
    league_points: String,
    record: String,
    win_rate: String,
}

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "#")]
    participant: String,
    team: String,
    player: String,
    champion: String,
    #[tabled(rename = "K/D/A")]
    kda: String,
    #[tabled(rename = "CS")]
    minions: String,
    gold: String,
    result: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    number: String,
    match_id: String,
    champion: String,
    #[tabled(rename = "K/D/A")]
    kda: String,
    duration: String,
    result: String,
}

fn header(title: &str, width: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

fn result_label(won: bool) -> String {
    if won {
        "WIN".green().to_string()
    } else {
        "LOSS".red().to_string()
    }
}

fn win_rate(wins: i64, losses: i64) -> String {
    let games = wins + losses;
    if games == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", wins as f64 / games as f64 * 100.0)
}

fn duration(seconds: i64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_summoner(profile: &SummonerProfile) {
    header(
        &format!("🎮 {} ({})", profile.summoner_name, profile.region),
        60,
    );
    println!("{} {}", "Level:".bold(), profile.summoner_level);
    println!("{} {}", "Summoner id:".bold(), profile.summoner_id);
    println!("{} {}", "Account id:".bold(), profile.account_id);
    println!("{} {}", "PUUID:".bold(), profile.puuid);
    println!(
        "{} {}\n",
        "Last update:".bold(),
        profile.revision_date.format("%Y-%m-%d %H:%M UTC")
    );
}

pub fn display_league_entries(entries: &[LeagueEntry]) {
    header("🏆 RANKED STANDINGS", 60);

    if entries.is_empty() {
        println!("{}\n", "Unranked in every queue".yellow());
        return;
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|entry| EntryRow {
            queue: entry.queue_type.clone(),
            rank: format!("{} {}", entry.tier, entry.rank),
            league_points: entry.league_points.to_string(),
            record: format!(
                "{}W / {}L ({})",
                entry.wins,
                entry.losses,
                win_rate(entry.wins, entry.losses)
            ),
            series: entry
                .mini_series
                .as_ref()
                .map(|series| series.progress.clone())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_listing(listing: &LeagueListing, top: usize) {
    header(
        &format!("📊 {} {} ({})", listing.tier, listing.name, listing.queue),
        80,
    );

    let mut ladder: Vec<_> = listing.entries.iter().collect();
    ladder.sort_by(|a, b| b.league_points.cmp(&a.league_points));

    let rows: Vec<LadderRow> = ladder
        .iter()
        .take(top)
        .enumerate()
        .map(|(idx, item)| LadderRow {
            number: (idx + 1).to_string(),
            summoner: item.summoner_name.clone(),
            league_points: item.league_points.to_string(),
            record: format!("{}W / {}L", item.wins, item.losses),
            win_rate: win_rate(item.wins, item.losses),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!(
        "{} {} players in league\n",
        "Total:".bold(),
        listing.entries.len()
    );
}

pub fn display_match(game: &MatchInfo) {
    header(
        &format!(
            "⚔ {} | {} | {}",
            game.game_mode,
            duration(game.game_duration),
            game.game_creation.format("%Y-%m-%d %H:%M UTC")
        ),
        90,
    );

    let rows: Vec<ParticipantRow> = game
        .participants
        .iter()
        .map(|p| ParticipantRow {
            participant: p.participant_id.to_string(),
            team: p.team_id.to_string(),
            player: p
                .riot_id_game_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| p.summoner_name.clone()),
            champion: p.champion_name.clone(),
            kda: format!("{}/{}/{}", p.kills, p.deaths, p.assists),
            minions: p.total_minions_killed.to_string(),
            gold: p.gold_earned.to_string(),
            result: result_label(p.win),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    for team in &game.teams {
        let objectives: Vec<String> = team
            .objectives
            .iter()
            .map(|o| format!("{} {}", o.objective, o.kills))
            .collect();
        println!(
            "{} {} {}",
            format!("Team {}:", team.team_id).bold(),
            result_label(team.win),
            objectives.join(", ")
        );
    }

    if !game.timeline_events.is_empty() {
        println!(
            "{} {} frames, {} events",
            "Timeline:".bold(),
            game.timeline_participants.len(),
            game.timeline_events.len()
        );
    }
    println!();
}

/// One line per match from the point of view of `puuid`.
pub fn display_match_history(games: &[(String, MatchInfo)], puuid: &str) {
    let total = games.len();
    header(&format!("📊 MATCH HISTORY (Last {} Games)", total), 80);

    let mut wins = 0;
    let mut rows = Vec::with_capacity(total);
    for (idx, (match_id, game)) in games.iter().enumerate() {
        let Some(player) = game.participants.iter().find(|p| p.puuid == puuid) else {
            continue;
        };
        if player.win {
            wins += 1;
        }

        rows.push(HistoryRow {
            number: (idx + 1).to_string(),
            match_id: match_id.clone(),
            champion: player.champion_name.clone(),
            kda: format!("{}/{}/{}", player.kills, player.deaths, player.assists),
            duration: duration(game.game_duration),
            result: result_label(player.win),
        });
    }

    let played = rows.len() as i64;
    println!(
        "{} {} W / {} L ({} WR)\n",
        "📈 Overall:".bold(),
        wins.to_string().green(),
        (played - wins).to_string().red(),
        win_rate(wins, played - wins)
    );

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}
