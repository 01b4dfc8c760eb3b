use rand::Rng;
use time::Weekday;

use crate::family::repo::FamilyMember;
use crate::meals::repo::Meal;

const MEAT_KEYWORDS: &[&str] = &["chicken", "beef", "pork", "meat", "fish"];
const GLUTEN_KEYWORDS: &[&str] = &["pasta", "bread", "pizza"];

#[derive(Debug)]
pub struct Scored<'a> {
    pub meal: &'a Meal,
    pub score: f64,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

fn tags(field: Option<&str>) -> Vec<String> {
    field
        .unwrap_or("")
        .to_lowercase()
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Deterministic part of the heuristic: base 50, adjusted per eating member's
/// likes/dislikes/dietary tags and day-of-week bonuses. Jitter is added by
/// the caller so tests can control it.
pub fn score_meal<'a>(meal: &'a Meal, members: &[FamilyMember], today: Weekday) -> Scored<'a> {
    let mut score = 50.0;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    let haystack = format!(
        "{} {} {}",
        meal.name,
        meal.description.as_deref().unwrap_or(""),
        meal.ingredients.as_deref().unwrap_or("")
    )
    .to_lowercase();
    let category = meal.category.as_deref().unwrap_or("").to_lowercase();

    for member in members {
        for like in tags(member.likes.as_deref()) {
            if haystack.contains(&like) {
                score += 15.0;
                reasons.push(format!("{} loves {}", member.name, like));
            }
        }
        for dislike in tags(member.dislikes.as_deref()) {
            if haystack.contains(&dislike) {
                score -= 30.0;
                warnings.push(format!("{} dislikes {}", member.name, dislike));
            }
        }

        let dietary = member.dietary.as_deref().unwrap_or("").to_lowercase();
        if dietary.contains("vegetarian")
            && MEAT_KEYWORDS.iter().any(|k| haystack.contains(k))
            && category != "vegetarian"
        {
            score -= 100.0;
            warnings.push(format!("Not suitable for {} (vegetarian)", member.name));
        }
        if dietary.contains("gluten") && GLUTEN_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            score -= 100.0;
            warnings.push(format!("Contains gluten - {} can't eat this", member.name));
        }
    }

    let weekend = matches!(today, Weekday::Saturday | Weekday::Sunday);
    if !weekend && meal.prep_time.as_deref() == Some("15 mins") {
        score += 10.0;
        reasons.push("Quick for a weekday".into());
    }
    if weekend && meal.category.as_deref() == Some("Weekend Special") {
        score += 15.0;
        reasons.push("Perfect for the weekend!".into());
    }

    Scored {
        meal,
        score,
        reasons,
        warnings,
    }
}

/// Scores every meal, adds bounded jitter in [0, 20) for variety, and
/// returns the highest scorer. `meals` must be non-empty.
pub fn pick_best<'a, R: Rng>(
    meals: &'a [Meal],
    members: &[FamilyMember],
    today: Weekday,
    rng: &mut R,
) -> Option<Scored<'a>> {
    meals
        .iter()
        .map(|meal| {
            let mut scored = score_meal(meal, members, today);
            scored.score += rng.gen_range(0.0..20.0);
            scored
        })
        .max_by(|a, b| a.score.total_cmp(&b.score))
}
