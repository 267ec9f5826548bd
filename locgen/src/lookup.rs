use crate::{options::Lookup, overpass};
use anyhow::{bail, Result};
use radarloc::{match_water_bodies, WaterMatch};

impl Lookup {
    pub fn run(&self) -> Result<()> {
        let location = self.name.join(" ");
        println!("Searching for water body: {location}");
        println!();

        let result = overpass::named_water_bodies(&location)?;
        let mut matches = match_water_bodies(&result);
        if matches.is_empty() {
            bail!("no water bodies match '{location}'");
        }
        matches.sort_by(|a, b| b.area_km2.total_cmp(&a.area_km2));

        let rule = "=".repeat(60);
        println!("{rule}");
        println!(
            "  Found {} water bodies matching '{location}'",
            matches.len()
        );
        println!("{rule}");
        println!();
        for (index, found) in matches.iter().take(10).enumerate() {
            print_match(index + 1, found);
        }
        println!("{rule}");
        println!();
        println!("To use a location, copy the coordinates and run:");
        println!();
        let example = &matches[0];
        println!(
            "  locgen generate \"{},{}\" --range 6",
            example.lat, example.lon
        );
        println!();
        Ok(())
    }
}

fn print_match(rank: usize, found: &WaterMatch) {
    let lat_dir = if found.lat >= 0.0 { 'N' } else { 'S' };
    let lon_dir = if found.lon >= 0.0 { 'E' } else { 'W' };
    println!("  {rank}. {}", found.name);
    println!(
        "     Coordinates: {:.4}{lat_dir}, {:.4}{lon_dir}",
        found.lat.abs(),
        found.lon.abs()
    );
    println!("     Area: ~{:.1} km²", found.area_km2);
    println!();
}
