use super::timeline::{TimelineEvent, TimelineParticipantFrame};
use chrono::{DateTime, Utc};

entity! {
    /// One finished game. Children are fanned out from `info.participants`,
    /// `info.teams` and, when requested, the match timeline.
    pub struct MatchInfo in "matches" {
        key {
            game_id: i64,
        }
        fields {
            platform_id: String,
            game_creation: DateTime<Utc>,
            game_duration: i64,
            game_mode: String,
            game_name: String,
            game_start_timestamp: Option<DateTime<Utc>>,
            game_end_timestamp: Option<DateTime<Utc>>,
            game_type: String,
            game_version: String,
            map_id: i64,
            queue_id: i64,
            tournament_code: Option<String>,
        }
        children {
            participants: Vec<MatchParticipant>,
            teams: Vec<MatchTeam>,
            timeline_participants: Vec<TimelineParticipantFrame>,
            timeline_events: Vec<TimelineEvent>,
        }
    }
}

entity! {
    /// End-of-game statistics of one player. `team_id` is denormalized and not part of the key.
    pub struct MatchParticipant in "participants" references "matches" (game_id) {
        key {
            game_id: i64,
            participant_id: i64,
        }
        fields {
            team_id: i64,
            assists: i64,
            baron_kills: i64,
            bounty_level: i64,
            champ_experience: i64,
            champ_level: i64,
            champion_id: i64,
            champion_name: String,
            champion_transform: i64,
            consumables_purchased: i64,
            damage_dealt_to_buildings: i64,
            damage_dealt_to_objectives: i64,
            damage_dealt_to_turrets: i64,
            damage_self_mitigated: i64,
            deaths: i64,
            detector_wards_placed: i64,
            double_kills: i64,
            dragon_kills: i64,
            first_blood_assist: bool,
            first_blood_kill: bool,
            first_tower_assist: bool,
            first_tower_kill: bool,
            game_ended_in_early_surrender: bool,
            game_ended_in_surrender: bool,
            gold_earned: i64,
            gold_spent: i64,
            individual_position: String,
            inhibitor_kills: i64,
            inhibitors_lost: i64,
            item0: i64,
            item1: i64,
            item2: i64,
            item3: i64,
            item4: i64,
            item5: i64,
            item6: i64,
            items_purchased: i64,
            killing_sprees: i64,
            kills: i64,
            lane: String,
            largest_critical_strike: i64,
            largest_killing_spree: i64,
            largest_multi_kill: i64,
            longest_time_spent_living: i64,
            magic_damage_dealt: i64,
            magic_damage_dealt_to_champions: i64,
            magic_damage_taken: i64,
            neutral_minions_killed: i64,
            nexus_kills: i64,
            nexus_lost: i64,
            objectives_stolen: i64,
            objectives_stolen_assists: i64,
            penta_kills: i64,
            physical_damage_dealt: i64,
            physical_damage_dealt_to_champions: i64,
            physical_damage_taken: i64,
            profile_icon: i64,
            puuid: String,
            quadra_kills: i64,
            riot_id_name: Option<String>,
            riot_id_game_name: Option<String>,
            riot_id_tagline: String,
            role: String,
            sight_wards_bought_in_game: i64,
            spell1_casts: i64,
            spell2_casts: i64,
            spell3_casts: i64,
            spell4_casts: i64,
            summoner1_casts: i64,
            summoner1_id: i64,
            summoner2_casts: i64,
            summoner2_id: i64,
            summoner_id: String,
            summoner_level: i64,
            summoner_name: String,
            team_early_surrendered: bool,
            team_position: String,
            time_c_cing_others: i64,
            time_played: i64,
            total_damage_dealt: i64,
            total_damage_dealt_to_champions: i64,
            total_damage_shielded_on_teammates: i64,
            total_damage_taken: i64,
            total_heal: i64,
            total_heals_on_teammates: i64,
            total_minions_killed: i64,
            total_time_c_c_dealt: i64,
            total_time_spent_dead: i64,
            total_units_healed: i64,
            triple_kills: i64,
            true_damage_dealt: i64,
            true_damage_dealt_to_champions: i64,
            true_damage_taken: i64,
            turret_kills: i64,
            turrets_lost: i64,
            unreal_kills: i64,
            vision_score: i64,
            vision_wards_bought_in_game: i64,
            wards_killed: i64,
            wards_placed: i64,
            win: bool,
            eligible_for_progression: Option<bool>,
            inhibitor_takedowns: Option<i64>,
            turret_takedowns: Option<i64>,
            nexus_takedowns: Option<i64>,
        }
        children {
            stat_perks: Vec<StatPerk>,
            style_perks: Vec<StylePerk>,
        }
    }
}

entity! {
    /// Stat-shard aggregates of a participant's rune page; exactly one per participant.
    pub struct StatPerk in "stat_perks" references "participants" (game_id, participant_id) {
        key {
            game_id: i64,
            participant_id: i64,
        }
        fields {
            team_id: i64,
            defense: i64,
            flex: i64,
            offense: i64,
        }
    }
}

entity! {
    /// One rune selected inside a style (primary or sub style).
    pub struct StylePerk in "style_perks" references "participants" (game_id, participant_id) {
        key {
            game_id: i64,
            participant_id: i64,
            style: i64,
            perk: i64,
        }
        fields {
            team_id: i64,
            description: String,
            var1: i64,
            var2: i64,
            var3: i64,
        }
    }
}

entity! {
    pub struct MatchTeam in "teams" references "matches" (game_id) {
        key {
            game_id: i64,
            team_id: i64,
        }
        fields {
            win: bool,
        }
        children {
            objectives: Vec<Objective>,
            bans: Vec<Ban>,
        }
    }
}

entity! {
    /// Team objective counter; `objective` is the map key it came from ("baron", "dragon", ...).
    pub struct Objective in "objectives" references "teams" (game_id, team_id) {
        key {
            game_id: i64,
            team_id: i64,
            objective: String,
        }
        fields {
            first: bool,
            kills: i64,
        }
    }
}

entity! {
    pub struct Ban in "bans" references "teams" (game_id, team_id) {
        key {
            game_id: i64,
            team_id: i64,
            pick_turn: i64,
        }
        fields {
            champion_id: i64,
        }
    }
}
