// benches/fight_page.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ufc_scrape::model::RawFields;
use ufc_scrape::normalize::normalize_fight;
use ufc_scrape::specs::fight;

fn cell(a: &str, b: &str) -> String {
    format!(
        r#"<td class="b-fight-details__table-col"><p class="b-fight-details__table-text">{a}</p><p class="b-fight-details__table-text">{b}</p></td>"#
    )
}

fn table(round: usize, cells: &[(&str, &str)]) -> String {
    let tds: String = cells.iter().map(|(a, b)| cell(a, b)).collect();
    format!(
        r#"<table><thead class="b-fight-details__table-row"><tr><th>Round {round}</th></tr></thead>
           <tbody><tr class="b-fight-details__table-row">{tds}</tr></tbody></table>"#
    )
}

/// Five-round fight page, both per-round tables, about the size of a live page.
fn sample() -> String {
    let mut body = String::new();
    for r in 1..=5 {
        body.push_str(&table(r, &[
            ("Red Fighter", "Blue Fighter"), ("0", "1"), ("31 of 70", "25 of 61"), ("44%", "40%"),
            ("40 of 80", "33 of 70"), ("1 of 3", "0 of 2"), ("33%", "0%"), ("0", "0"), ("0", "0"), ("1:40", "0:12"),
        ]));
        body.push_str(&table(r, &[
            ("Red Fighter", "Blue Fighter"), ("31 of 70", "25 of 61"), ("44%", "40%"), ("20 of 55", "12 of 44"),
            ("6 of 8", "9 of 11"), ("5 of 7", "4 of 6"), ("28 of 64", "22 of 57"), ("3 of 6", "3 of 4"), ("0 of 0", "0 of 0"),
        ]));
    }
    format!(
        r#"<html><body>
           <h2 class="b-content__title"><a href="/event-details/e">UFC Bench</a></h2>
           <div class="b-fight-details__person"><h3 class="b-fight-details__person-name"><a href="/fighter-details/r">Red Fighter</a></h3></div>
           <div class="b-fight-details__person"><h3 class="b-fight-details__person-name"><a href="/fighter-details/b">Blue Fighter</a></h3></div>
           {body}
           </body></html>"#
    )
}

fn bench_fight_page(c: &mut Criterion) {
    let doc = sample();
    let profiles = [RawFields::new(), RawFields::new()];

    c.bench_function("fight_parse", |b| {
        b.iter(|| {
            let page = fight::parse_doc(black_box(&doc));
            black_box(page.rounds.len())
        })
    });

    let page = fight::parse_doc(&doc);
    c.bench_function("fight_normalize", |b| {
        b.iter(|| {
            let recs = normalize_fight("u", black_box(&page), &profiles);
            black_box(recs.len())
        })
    });
}

criterion_group!(benches, bench_fight_page);
criterion_main!(benches);
