use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;

/// группы бенчмарков
const GROUPS: [&str; 5] = ["nfc", "nfd", "nfkc", "nfkd", "fcd"];

/// выведем результаты бенчмарка как CSV: строки - тексты, колонки - реализации
fn main()
{
    let args: Vec<String> = env::args().collect();

    let file_name = match args.get(1) {
        Some(name) => name,
        None => {
            println!("Использование: {} <файл с выводом criterion>", args[0]);
            return;
        }
    };

    let contents = match fs::read_to_string(file_name) {
        Ok(contents) => contents,
        Err(e) => {
            println!("Не удалось прочитать {}: {}", file_name, e);
            return;
        }
    };

    for group in GROUPS {
        let results = parse(&contents, group);

        if !results.is_empty() {
            println!("{}:\n{}", group.to_uppercase(), csv(&results));
        }
    }
}

/// время в микросекундах: (реализация, текст) -> время
fn parse(source: &str, group: &str) -> BTreeMap<(String, String), u32>
{
    let mut result = BTreeMap::new();
    let prefix = format!("{}/", group);

    for line in source.lines().filter(|line| line.starts_with(&prefix)) {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // nfc/text/latin  time:   [123.45 µs 124.00 µs 125.10 µs]
        let (name, time, unit) = match parts.as_slice() {
            [name, _, _, _, time, unit, ..] => (name, time, unit),
            _ => continue,
        };

        let mut time = match time.parse::<f64>() {
            Ok(time) => time,
            Err(_) => continue,
        };

        match *unit {
            "ms" => time *= 1000.0,
            "ns" => time /= 1000.0,
            _ => (),
        }

        if let [_, variant, text] = name.split('/').collect::<Vec<&str>>().as_slice() {
            result.insert((variant.to_string(), text.to_string()), time.trunc() as u32);
        }
    }

    result
}

fn csv(results: &BTreeMap<(String, String), u32>) -> String
{
    let variants: BTreeSet<&String> = results.keys().map(|(variant, _)| variant).collect();
    let texts: BTreeSet<&String> = results.keys().map(|(_, text)| text).collect();

    let mut csv = String::new();

    for variant in variants.iter() {
        csv.push_str(&format!(";{}", variant));
    }
    csv.push('\n');

    for text in texts {
        csv.push_str(text);

        for variant in variants.iter() {
            let time = results.get(&(variant.to_string(), text.to_string())).unwrap_or(&0);
            csv.push_str(&format!(";{}", time));
        }

        csv.push('\n');
    }

    csv
}
