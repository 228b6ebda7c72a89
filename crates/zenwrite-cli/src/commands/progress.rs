use zenwrite_core::progress::LevelTable;
use zenwrite_core::AchievementBook;

/// Catalog listing. Progress is per session, so nothing is unlocked here.
pub fn badges(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let statuses = AchievementBook::new().statuses();
    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }
    for status in &statuses {
        let a = &status.achievement;
        println!("{:<20} {:<20} {}", a.id, a.name, a.description);
    }
    Ok(())
}

pub fn levels(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = LevelTable::default();
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }
    for (i, xp) in table.thresholds().iter().enumerate() {
        println!("level {:>2}  {:>6} XP", i + 1, xp);
    }
    Ok(())
}
