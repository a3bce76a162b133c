//! Progress aggregator: pure read-side analytics over the completed
//! session history. Nothing here persists state; every report is computed
//! on demand from the rows the db layer returns.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{
    CalorieLeader, Exercise, ExerciseCompletion, ExerciseIntensity, MonthlyBucket,
    MuscleGroupHeat, ProgressOverview, ProgressReport, WeeklyBucket, WorkoutSession,
};

/// Per-rep calorie coefficient used when the catalog leaves it unset.
pub const DEFAULT_CALORIES_PER_REP: f64 = 0.5;

/// Normalization references for the intensity score. A set averaging
/// 100 kg, 50 total reps or 5 sets saturates its share of the score.
const REF_AVG_WEIGHT: f64 = 100.0;
const REF_TOTAL_REPS: f64 = 50.0;
const REF_SET_COUNT: f64 = 5.0;

const TOP_EXERCISES_LIMIT: usize = 5;
const RECENT_SESSIONS_LIMIT: usize = 10;

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// All-time totals plus the current streak.
pub fn overview(
    sessions: &[WorkoutSession],
    completion_count: i64,
    today: NaiveDate,
) -> ProgressOverview {
    let training_days: HashSet<NaiveDate> = sessions
        .iter()
        .filter_map(|s| parse_date(&s.session_date))
        .collect();

    ProgressOverview {
        total_sessions: sessions.len() as i64,
        total_minutes: sessions.iter().filter_map(|s| s.duration_minutes).sum(),
        total_calories: sessions.iter().filter_map(|s| s.calories_burned).sum(),
        total_exercises: completion_count,
        current_streak: streak(&training_days, today),
    }
}

/// Consecutive training days walking backward from the most recent
/// anchor. A day counts when at least one completed session exists on it.
/// "Today not yet trained" still counts a streak running through
/// yesterday; a gap of one full day resets.
pub fn streak(training_days: &HashSet<NaiveDate>, today: NaiveDate) -> i64 {
    let anchor = if training_days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if training_days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 0;
    let mut day = anchor;
    loop {
        if !training_days.contains(&day) {
            break;
        }
        count += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    count
}

/// `(current - previous) / previous * 100`, with the zero-previous
/// convention: anything grown from nothing is +100%, nothing from nothing
/// is 0%.
pub fn growth_pct(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Sessions grouped by ISO week, chronological. Only weeks with at least
/// one session appear; growth chains over the emitted buckets' calories.
pub fn weekly_buckets(sessions: &[WorkoutSession]) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<(i32, u32), (i64, f64)> = BTreeMap::new();
    for session in sessions {
        let Some(date) = parse_date(&session.session_date) else {
            continue;
        };
        let week = date.iso_week();
        let entry = buckets.entry((week.year(), week.week())).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += session.calories_burned.unwrap_or(0.0);
    }

    let mut previous = 0.0;
    buckets
        .into_iter()
        .map(|((year, week), (count, calories))| {
            let bucket = WeeklyBucket {
                week: format!("{year}-W{week:02}"),
                sessions: count,
                calories,
                growth_pct: growth_pct(previous, calories),
            };
            previous = calories;
            bucket
        })
        .collect()
}

/// All twelve months of `year`, zero-filled, growth chained month over
/// month on calories.
pub fn monthly_buckets(sessions: &[WorkoutSession], year: i32) -> Vec<MonthlyBucket> {
    let mut by_month: HashMap<u32, (i64, f64)> = HashMap::new();
    for session in sessions {
        let Some(date) = parse_date(&session.session_date) else {
            continue;
        };
        if date.year() != year {
            continue;
        }
        let entry = by_month.entry(date.month()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += session.calories_burned.unwrap_or(0.0);
    }

    let mut previous = 0.0;
    (1..=12)
        .map(|month| {
            let (count, calories) = by_month.get(&month).copied().unwrap_or((0, 0.0));
            let bucket = MonthlyBucket {
                month: format!("{year:04}-{month:02}"),
                sessions: count,
                calories,
                growth_pct: growth_pct(previous, calories),
            };
            previous = calories;
            bucket
        })
        .collect()
}

/// Estimated calories of one completion: performed reps times the
/// exercise's per-rep coefficient.
pub fn completion_calories(completion: &ExerciseCompletion, coefficient: Option<f64>) -> f64 {
    let total_reps: i64 = completion.series_data.0.iter().map(|s| s.reps).sum();
    total_reps as f64 * coefficient.unwrap_or(DEFAULT_CALORIES_PER_REP)
}

/// Calorie sum per exercise over a window, ranked descending.
pub fn top_calorie_exercises(
    completions: &[ExerciseCompletion],
    catalog: &HashMap<String, Exercise>,
    limit: usize,
) -> Vec<CalorieLeader> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for completion in completions {
        let coefficient = catalog
            .get(&completion.exercise_id)
            .and_then(|e| e.calories_per_rep);
        *totals.entry(completion.exercise_id.as_str()).or_insert(0.0) +=
            completion_calories(completion, coefficient);
    }

    let mut leaders: Vec<CalorieLeader> = totals
        .into_iter()
        .map(|(exercise_id, calories)| CalorieLeader {
            exercise_id: exercise_id.to_string(),
            name: catalog
                .get(exercise_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| exercise_id.to_string()),
            calories,
        })
        .collect();

    leaders.sort_by(|a, b| {
        b.calories
            .partial_cmp(&a.calories)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    leaders.truncate(limit);
    leaders
}

/// Completion tally per muscle group, normalized to 0–100 against the
/// most-trained group. Completions whose exercise is missing from the
/// catalog are skipped.
pub fn muscle_heatmap(
    completions: &[ExerciseCompletion],
    catalog: &HashMap<String, Exercise>,
) -> Vec<MuscleGroupHeat> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for completion in completions {
        if let Some(exercise) = catalog.get(&completion.exercise_id) {
            *counts.entry(exercise.muscle_group.as_str()).or_insert(0) += 1;
        }
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let mut groups: Vec<MuscleGroupHeat> = counts
        .into_iter()
        .map(|(muscle_group, count)| MuscleGroupHeat {
            muscle_group: muscle_group.to_string(),
            count,
            heat: if max > 0 {
                count as f64 / max as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.muscle_group.cmp(&b.muscle_group)));
    groups
}

/// Weighted intensity of one completion: normalized average weight (40%),
/// normalized total reps (35%) and normalized set count (25%), each
/// capped at 1.0 before weighting, scaled to 0–100.
pub fn intensity_score(completion: &ExerciseCompletion) -> f64 {
    let series = &completion.series_data.0;
    if series.is_empty() {
        return 0.0;
    }

    let set_count = series.len() as f64;
    let total_reps: i64 = series.iter().map(|s| s.reps).sum();
    let avg_weight = series.iter().map(|s| s.weight).sum::<f64>() / set_count;

    let weight_part = (avg_weight / REF_AVG_WEIGHT).min(1.0);
    let reps_part = (total_reps as f64 / REF_TOTAL_REPS).min(1.0);
    let sets_part = (set_count / REF_SET_COUNT).min(1.0);

    (weight_part * 0.40 + reps_part * 0.35 + sets_part * 0.25) * 100.0
}

pub fn intensity_label(score: f64) -> &'static str {
    if score < 25.0 {
        "Low"
    } else if score < 50.0 {
        "Medium"
    } else if score < 75.0 {
        "High"
    } else {
        "Very High"
    }
}

/// Per-exercise intensity rows for a session detail view.
pub fn session_intensities(
    completions: &[ExerciseCompletion],
    catalog: &HashMap<String, Exercise>,
) -> Vec<ExerciseIntensity> {
    completions
        .iter()
        .map(|completion| {
            let score = intensity_score(completion);
            ExerciseIntensity {
                exercise_id: completion.exercise_id.clone(),
                name: catalog
                    .get(&completion.exercise_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| completion.exercise_id.clone()),
                score,
                label: intensity_label(score),
            }
        })
        .collect()
}

/// Completed-session counts indexed by day-of-week, 0 = Sunday.
pub fn sessions_by_day(sessions: &[WorkoutSession]) -> [i64; 7] {
    let mut counts = [0i64; 7];
    for session in sessions {
        if (0..7).contains(&session.day_of_week) {
            counts[session.day_of_week as usize] += 1;
        }
    }
    counts
}

/// Loads the catalog entries referenced by a set of completions. History
/// sizes are small enough that per-id lookups are fine.
pub async fn load_catalog(
    pool: &SqlitePool,
    completions: &[ExerciseCompletion],
) -> Result<HashMap<String, Exercise>, AppError> {
    let ids: HashSet<&str> = completions.iter().map(|c| c.exercise_id.as_str()).collect();
    let mut catalog = HashMap::new();
    for id in ids {
        if let Some(exercise) = db::find_exercise(pool, id).await? {
            catalog.insert(exercise.id.clone(), exercise);
        }
    }
    Ok(catalog)
}

/// History view: full completed-session list plus the overview stats.
pub async fn build_history(
    pool: &SqlitePool,
    profile_id: &str,
    today: NaiveDate,
) -> Result<(Vec<WorkoutSession>, ProgressOverview), AppError> {
    db::find_profile(pool, profile_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let sessions = db::list_completed_sessions(pool, profile_id).await?;
    let completion_count = db::count_completions(pool, profile_id).await?;
    let stats = overview(&sessions, completion_count, today);
    Ok((sessions, stats))
}

/// Year-scoped progress report.
pub async fn build_progress(
    pool: &SqlitePool,
    profile_id: &str,
    year: i32,
    today: NaiveDate,
) -> Result<ProgressReport, AppError> {
    db::find_profile(pool, profile_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let all_sessions = db::list_completed_sessions(pool, profile_id).await?;
    let completion_count = db::count_completions(pool, profile_id).await?;
    let year_sessions = db::list_completed_sessions_for_year(pool, profile_id, year).await?;
    let year_completions = db::list_completions_for_year(pool, profile_id, year).await?;
    let catalog = load_catalog(pool, &year_completions).await?;

    let recent_sessions: Vec<WorkoutSession> = all_sessions
        .iter()
        .take(RECENT_SESSIONS_LIMIT)
        .cloned()
        .collect();

    Ok(ProgressReport {
        overview: overview(&all_sessions, completion_count, today),
        weekly_data: weekly_buckets(&year_sessions),
        monthly_data: monthly_buckets(&year_sessions, year),
        top_muscle_groups: muscle_heatmap(&year_completions, &catalog),
        top_calorie_exercises: top_calorie_exercises(
            &year_completions,
            &catalog,
            TOP_EXERCISES_LIMIT,
        ),
        recent_sessions,
        sessions_by_day: sessions_by_day(&year_sessions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesEntry;
    use sqlx::types::Json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session_on(session_date: &str, calories: Option<f64>) -> WorkoutSession {
        let parsed = parse_date(session_date).unwrap();
        WorkoutSession {
            id: format!("s-{session_date}"),
            client_profile_id: "m1".to_string(),
            session_date: session_date.to_string(),
            day_of_week: parsed.weekday().num_days_from_sunday() as i64,
            routine_ids: Json(vec![]),
            name: None,
            is_free_workout: 1,
            completed: 1,
            duration_minutes: Some(45),
            calories_burned: calories,
            started_at: format!("{session_date}T10:00:00.000Z"),
            completed_at: Some(format!("{session_date}T11:00:00.000Z")),
        }
    }

    fn completion(exercise_id: &str, series: Vec<SeriesEntry>) -> ExerciseCompletion {
        ExerciseCompletion {
            id: uuid::Uuid::now_v7().to_string(),
            session_id: "s1".to_string(),
            exercise_id: exercise_id.to_string(),
            target_sets: Some(3),
            target_reps: Some("8-12".to_string()),
            series_data: Json(series),
            completed_at: "2026-08-20T10:00:00.000Z".to_string(),
        }
    }

    fn set(set_number: i64, reps: i64, weight: f64) -> SeriesEntry {
        SeriesEntry {
            set_number,
            reps,
            weight,
        }
    }

    fn exercise(id: &str, muscle_group: &str, coefficient: Option<f64>) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: format!("exercise {id}"),
            muscle_group: muscle_group.to_string(),
            calories_per_rep: coefficient,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let today = date(2026, 8, 24);
        let days: HashSet<NaiveDate> = [date(2026, 8, 24), date(2026, 8, 23), date(2026, 8, 22)]
            .into_iter()
            .collect();
        assert_eq!(streak(&days, today), 3);
    }

    #[test]
    fn streak_allows_today_untrained() {
        // Trained through yesterday; today still pending.
        let today = date(2026, 8, 24);
        let days: HashSet<NaiveDate> = [date(2026, 8, 23), date(2026, 8, 22)]
            .into_iter()
            .collect();
        assert_eq!(streak(&days, today), 2);
    }

    #[test]
    fn streak_resets_after_gap() {
        let today = date(2026, 8, 24);
        // Gap on the 22nd: only the run after the gap counts.
        let days: HashSet<NaiveDate> = [date(2026, 8, 24), date(2026, 8, 23), date(2026, 8, 21)]
            .into_iter()
            .collect();
        assert_eq!(streak(&days, today), 2);

        // Last training two days ago: no current streak at all.
        let stale: HashSet<NaiveDate> = [date(2026, 8, 22)].into_iter().collect();
        assert_eq!(streak(&stale, today), 0);
    }

    #[test]
    fn growth_pct_conventions() {
        assert_eq!(growth_pct(0.0, 50.0), 100.0);
        assert_eq!(growth_pct(0.0, 0.0), 0.0);
        assert_eq!(growth_pct(100.0, 50.0), -50.0);
        assert_eq!(growth_pct(50.0, 75.0), 50.0);
    }

    #[test]
    fn weekly_buckets_group_by_iso_week() {
        // 2026-08-17 (Mon) and 2026-08-19 share ISO week 34; 2026-08-24 is week 35.
        let sessions = vec![
            session_on("2026-08-17", Some(100.0)),
            session_on("2026-08-19", Some(50.0)),
            session_on("2026-08-24", Some(300.0)),
        ];

        let buckets = weekly_buckets(&sessions);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week, "2026-W34");
        assert_eq!(buckets[0].sessions, 2);
        assert_eq!(buckets[0].calories, 150.0);
        assert_eq!(buckets[0].growth_pct, 100.0); // grown from nothing
        assert_eq!(buckets[1].week, "2026-W35");
        assert_eq!(buckets[1].growth_pct, 100.0); // 150 → 300
    }

    #[test]
    fn monthly_buckets_cover_all_twelve_months() {
        let sessions = vec![
            session_on("2026-03-10", Some(200.0)),
            session_on("2026-03-12", None),
            session_on("2026-05-01", Some(100.0)),
        ];

        let buckets = monthly_buckets(&sessions, 2026);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[2].month, "2026-03");
        assert_eq!(buckets[2].sessions, 2);
        assert_eq!(buckets[2].calories, 200.0);
        assert_eq!(buckets[3].sessions, 0);
        assert_eq!(buckets[3].growth_pct, -100.0); // 200 → 0
        assert_eq!(buckets[4].growth_pct, 100.0); // 0 → 100
    }

    #[test]
    fn completion_calories_uses_default_coefficient() {
        let c = completion("e1", vec![set(1, 10, 60.0), set(2, 10, 60.0)]);
        assert_eq!(completion_calories(&c, None), 10.0); // 20 reps * 0.5
        assert_eq!(completion_calories(&c, Some(2.0)), 40.0);
    }

    #[test]
    fn top_calorie_exercises_ranks_descending() {
        let mut catalog = HashMap::new();
        catalog.insert("squat".to_string(), exercise("squat", "legs", Some(1.0)));
        catalog.insert("curl".to_string(), exercise("curl", "arms", Some(0.2)));

        let completions = vec![
            completion("curl", vec![set(1, 20, 10.0)]),  // 4 kcal
            completion("squat", vec![set(1, 10, 80.0)]), // 10 kcal
        ];

        let leaders = top_calorie_exercises(&completions, &catalog, 5);
        assert_eq!(leaders[0].exercise_id, "squat");
        assert_eq!(leaders[0].calories, 10.0);
        assert_eq!(leaders[1].exercise_id, "curl");
    }

    #[test]
    fn heatmap_normalizes_against_max_group() {
        let mut catalog = HashMap::new();
        catalog.insert("squat".to_string(), exercise("squat", "legs", None));
        catalog.insert("press".to_string(), exercise("press", "chest", None));

        let completions = vec![
            completion("squat", vec![set(1, 10, 80.0)]),
            completion("squat", vec![set(1, 10, 80.0)]),
            completion("press", vec![set(1, 10, 40.0)]),
            // Unknown exercises are skipped, not counted.
            completion("ghost", vec![set(1, 10, 0.0)]),
        ];

        let heat = muscle_heatmap(&completions, &catalog);
        assert_eq!(heat.len(), 2);
        assert_eq!(heat[0].muscle_group, "legs");
        assert_eq!(heat[0].heat, 100.0);
        assert_eq!(heat[1].muscle_group, "chest");
        assert_eq!(heat[1].heat, 50.0);
    }

    #[test]
    fn intensity_score_weights_and_caps() {
        // Saturates every component: avg 120 kg, 60 reps, 6 sets.
        let heavy = completion(
            "squat",
            (1..=6).map(|n| set(n, 10, 120.0)).collect(),
        );
        assert_eq!(intensity_score(&heavy), 100.0);
        assert_eq!(intensity_label(intensity_score(&heavy)), "Very High");

        // Bodyweight-ish: 0 kg, 10 reps, 1 set → 0.35*0.2 + 0.25*0.2 = 12.
        let light = completion("curl", vec![set(1, 10, 0.0)]);
        let score = intensity_score(&light);
        assert!((score - 12.0).abs() < 1e-9);
        assert_eq!(intensity_label(score), "Low");
    }

    #[test]
    fn intensity_labels_bucket_at_boundaries() {
        assert_eq!(intensity_label(0.0), "Low");
        assert_eq!(intensity_label(25.0), "Medium");
        assert_eq!(intensity_label(50.0), "High");
        assert_eq!(intensity_label(75.0), "Very High");
    }

    #[test]
    fn overview_sums_and_streaks() {
        let sessions = vec![
            session_on("2026-08-24", Some(100.0)),
            session_on("2026-08-23", None),
        ];
        let stats = overview(&sessions, 7, date(2026, 8, 24));
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_minutes, 90);
        assert_eq!(stats.total_calories, 100.0);
        assert_eq!(stats.total_exercises, 7);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn sessions_by_day_is_sunday_indexed() {
        let sessions = vec![
            session_on("2026-08-23", None), // Sunday
            session_on("2026-08-24", None), // Monday
            session_on("2026-08-31", None), // Monday
        ];
        let counts = sessions_by_day(&sessions);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[2..].iter().sum::<i64>(), 0);
    }
}
