//! Text rendering of session records for the terminal

use std::fmt::Write as _;

use colored::Colorize;

use crate::domain::{DayPlan, Itinerary, StoryTheme, Storybook, WeatherForecast};
use crate::session::StoryResult;

pub fn itinerary(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", itinerary.trip_title.bright_cyan().bold());
    let _ = writeln!(out, "{} {}", "Best time to visit:".dimmed(), itinerary.best_time_to_visit);

    if let Some(forecast) = &itinerary.weather_forecast {
        out.push_str(&weather(forecast));
    }

    for day in &itinerary.days {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", format!("Day {}:", day.day).bright_green().bold(), day.title);
        for activity in &day.activities {
            let _ = writeln!(out, "  {:>10}  {}", activity.time.yellow(), activity.description);
        }
        let _ = writeln!(
            out,
            "  {} {} - {}",
            "Eat:".dimmed(),
            day.food_suggestion.name,
            day.food_suggestion.description
        );
    }

    let _ = writeln!(out);
    let _ = write!(
        out,
        "{}",
        "Use /day N for details, /storybook to retell the trip, /save to export.".dimmed()
    );
    out
}

pub fn day(day: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Day {}: {}", day.day, day.title).bright_cyan().bold());
    let _ = writeln!(out, "{} {}", "Image:".dimmed(), day.day_image);
    let _ = writeln!(
        out,
        "{} {:.4}, {:.4}  {}",
        "Location:".dimmed(),
        day.coords.lat,
        day.coords.lng,
        day.coords.map_url().underline()
    );

    let _ = writeln!(out);
    for activity in &day.activities {
        match &activity.location {
            Some(location) => {
                let _ = writeln!(
                    out,
                    "  {:>10}  {} ({})",
                    activity.time.yellow(),
                    activity.description,
                    location
                );
            }
            None => {
                let _ = writeln!(out, "  {:>10}  {}", activity.time.yellow(), activity.description);
            }
        }
    }

    let food = &day.food_suggestion;
    let _ = writeln!(out);
    let _ = writeln!(out, "{} {} - {}", "Taste:".bright_yellow(), food.name, food.description);
    let _ = writeln!(out, "        {}", food.image_url.dimmed());

    if let Some(nearby) = &day.nearby_suggestion {
        let _ = writeln!(out, "{} {} - {}", "Nearby:".bright_yellow(), nearby.name, nearby.description);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Hear a story about this place with /story THEME:".dimmed());
    for theme in StoryTheme::ALL {
        let _ = writeln!(out, "  {:<16} {}", theme.name().yellow(), theme.blurb());
    }
    out.trim_end().to_string()
}

pub fn story(story: &StoryResult) -> String {
    format!(
        "{}\n\n{}",
        format!("{} story: {}", story.theme, story.poi).bright_cyan().bold(),
        story.text
    )
}

pub fn storybook(book: &Storybook) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title.bright_magenta().bold());
    let _ = writeln!(out, "{} {}", "Cover:".dimmed(), book.cover_image);

    for page in &book.pages {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", format!("Day {} - {}", page.day, page.title).bright_green());
        let _ = writeln!(out, "{}", page.narrative);
        let _ = writeln!(out, "{}", page.image.dimmed());
    }
    out.trim_end().to_string()
}

fn weather(forecast: &WeatherForecast) -> String {
    let mut out = String::new();
    for day in &forecast.daily {
        let _ = writeln!(
            out,
            "  {:<10} {:?} {:.0}/{:.0}  {}",
            day.day_of_week, day.icon, day.high_temp, day.low_temp, day.description
        );
    }
    out
}
