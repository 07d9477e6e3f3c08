use unicode_text_prepare::Stats;

/// информация о подготовленном файле
pub fn print(filename: &str, bytes: &[u8], stats: &Stats)
{
    println!("\n{}:\n  общий размер: {}", filename, bytes.len());

    println!();

    let mut keys: Vec<&String> = stats.keys().collect();
    keys.sort_by(|a, b| stats[*b].cmp(&stats[*a]).then(a.cmp(b)));

    for key in keys {
        println!("  {}: {}", key, stats[key]);
    }

    println!();
}
