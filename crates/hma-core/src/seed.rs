//! Seed dataset used when persisted state is absent, unreadable, or has an
//! empty client or notarization list.

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{Client, LedgerEntry, PjsRecord};
use crate::FEE_DESCRIPTION;

/// Ledger date shared by every seed client.
const CLIENT_SEED_DATE: (i32, u32, u32) = (2025, 1, 1);

/// `(id, name, detail, initial fee in ringgit)`
const CLIENTS: &[(&str, &str, &str, i64)] = &[
    ("c1", "AMIRA", "N.Anak", 2500),
    ("c2", "AMIR", "Faraid Pusaka", 4000),
    ("c3", "EZZRY", "N.Anak", 3000),
    ("c4", "HAJAR", "Fasakh", 4000),
    ("c5", "HIDAYAH LAZIM", "Hadhanah", 5000),
    ("c6", "IZWANY", "Takliq", 3000),
    ("c7", "AZIZAH-JAHAYA", "Semakan", 6000),
    ("c8", "MUSLIHA", "HDP", 6000),
    ("c9", "RASHIDI", "N.Anak", 4500),
    ("c10", "ROSIDAH", "Fasakh", 3000),
    ("c11", "SYAMIMI", "Fasakh", 3200),
    ("c12", "S.AMBERI", "Hadhanah", 4500),
    ("c13", "SYAFAWANI", "Fasakh", 3500),
    ("c14", "SYAHRIZAITUL", "N.Ank", 3000),
    ("c15", "SHURAIDA", "N.Anak", 3000),
    ("c16", "YAZID", "Fasakh", 1500),
    ("c17", "ZAINAB", "Takliq", 3200),
    ("c18", "ZULHAZLIN", "H.Sepencarian", 5000),
    ("c19", "ZULHAZLIN", "Rayuan", 15000),
    ("c20", "ZUL AZRIN", "Pusaka", 3000),
    ("c21", "AZMIRA YANTI", "Khalwat", 1000),
    ("c22", "NOR RIZA", "Fasakh", 3500),
    ("c23", "KAMAL", "Carian (Pusaka)", 500),
    ("c24", "HAYATI", "Hadhanah", 4500),
    ("c25", "HAYATI", "N. Anak", 2500),
];

/// `(id, date, name, detail, amount in ringgit)`
const PJS_RECORDS: &[(&str, &str, &str, &str, i64)] = &[
    ("1", "2025-11-02", "AHMAD SUBRI BIN HARUN", "AKUAN BERKANUN", 10),
    ("2", "2025-10-19", "ABDUL RAHIM BIN MAT ISA", "AFIDAVIT", 90),
    ("3", "2025-10-19", "ABU MANSOR BIN HAMID", "AKUAN BERKANUN", 10),
    ("4", "2025-10-19", "AFIF ULWAN BIN SAIFUL ADLI", "AKUAN BERKANUN", 20),
    ("5", "2025-11-06", "FATIMAH BINTI ISMAIL", "AMANAHRAYA", 10),
    ("6", "2025-11-02", "HASIAH BINTI AHMAD", "DDA", 10),
    ("7", "2025-11-27", "KHOTIJAH BINTI AHMAD", "DDA", 10),
    ("8", "2025-11-06", "MUHAMMAD HAFIZ ADZIM AZHAR", "AMANAHRAYA", 0),
    ("9", "2025-11-06", "SITI NURSYAFIQAH BINTI AZHAR", "AMANAHRAYA", 0),
    ("10", "2025-11-06", "SITI ROKIAH BINTI ABU BAKAR", "AMANAHRAYA", 0),
    ("11", "2025-11-02", "MAT REJAB BIN AHMAD", "DDA", 10),
    ("12", "2025-11-02", "NAZLIZA BINTI CHE ROOS", "DDA", 10),
    ("13", "2025-10-27", "NUR FAIRINA BT ABDULLAH", "AKUAN (AMANAHRAYA)", 0),
    ("14", "2025-10-27", "NUR MASSITAH BT ZAIDI", "AKUAN (GADAIAN) EKSHIBIT", 10),
    ("15", "2025-10-23", "SUPIAN A/L SULIM", "AKUAN BERKANUN", 10),
    ("16", "2025-10-26", "ZUL AZRIN BIN HAIROL FADILAH", "BORANG A", 10),
    ("17", "2025-11-13", "NUR NABILAH BINTI ABDUL RAZAK", "AKUAN BERKANUN", 10),
    ("18", "2025-11-13", "NOOR AISHAH BINTI MOHAMAD", "AKUAN BERKANUN", 10),
    ("19", "2025-11-13", "AMAR HAIKAL BIN MOHD SHARUL", "AKUAN BERKANUN", 10),
    ("20", "2025-11-16", "ISMAIL BIN CHE ANI", "AKUAN BERKANUN", 20),
    ("21", "2025-11-16", "AB RAZAK BIN HUSSAIN", "BORANG A", 10),
    ("22", "2025-11-16", "NORMADIAH BINTI ZAKARIA", "AKUAN BERKANUN", 30),
    ("23", "2025-11-16", "AWANG DOI BIN KADER", "AKUAN BERKANUN", 30),
    ("24", "2025-11-16", "ABDUL RAHMAN BIN MUSA", "AKUAN BERKANUN", 30),
    ("25", "2025-11-23", "NURUL SYUHADA BINTI ISMAIL", "AKUAN BERKANUN", 20),
    ("26", "2025-11-26", "ANARD A/L TNOM", "AKUAN BERKANUN", 20),
    ("27", "2025-11-26", "TNOM A/L DIN CHENG", "AKUAN BERKANUN", 10),
    ("28", "2025-12-11", "AIMI HUSAINI BIN ABD MANAFF", "AKUAN BERKANUN", 10),
    ("29", "2025-12-11", "AIMI HAZWAN BIN ABD MANAFF", "AKUAN BERKANUN", 10),
    ("30", "2025-12-11", "AIMI ASHRAF BIN ABD MANAFF", "AKUAN BERKANUN", 10),
    ("31", "2025-12-11", "AIMI AMALINA BT ABD MANAFF", "AKUAN BERKANUN", 10),
    ("32", "2025-12-11", "ABDULLAH BIN ABD AZIZ", "AKUAN BERKANUN", 10),
    ("33", "2025-12-11", "MOHD NOOR BIN MD ISA", "AKUAN BERKANUN", 10),
    ("34", "2025-12-09", "ANARD A/L TNOM", "AKUAN BERKANUN", 10),
    ("35", "2025-12-07", "MUHAMMAD NAZRUL NAZMI BIN MOHD FUZI", "AKUAN BERKANUN", 10),
    ("36", "2025-12-07", "MUHAMAD RAHIMI BIN MOHD FUZI", "AKUAN BERKANUN", 10),
    ("37", "2025-12-07", "MIMI WAHIDAH BT MOHD FUZI", "AKUAN BERKANUN", 10),
    ("38", "2025-12-04", "KELSUM BIN ABD KHALID", "AKUAN BERKANUN", 10),
    ("39", "2025-12-03", "AHMAD TARMIZI BIN MAT", "AKUAN BERKANUN", 10),
    ("40", "2025-12-01", "BUKPHA A/P SANANAM", "AKUAN BERKANUN", 10),
    ("41", "2025-12-01", "SYAMSUL FETRI BIN RAMLI", "AKUAN BERKANUN", 10),
    ("42", "2025-12-01", "ASIAH BINTI MOHD YUSOFF", "AKUAN BERKANUN", 10),
    ("43", "2025-12-17", "OMAR BIN AHMAD", "AKUAN BERKANUN", 10),
    ("44", "2025-12-18", "JANISYA HAWANI HANAFI", "AKUAN BERKANUN", 10),
    ("45", "2025-12-18", "HANAFI BIN ABDUL WAHAB", "AKUAN BERKANUN", 10),
    ("46", "2025-12-22", "NORANISAH BT ISHAK", "DDA", 10),
    ("47", "2025-12-22", "MD OSMAN BIN ISHAK", "DDA", 10),
    ("48", "2025-12-23", "TNOM A/L DEN CHENG", "AKUAN BERKANUN", 10),
    ("49", "2025-12-25", "JAMILAH BINTI AWANG", "AKUAN BERKANUN", 10),
    ("50", "2025-12-29", "MOHD SHUKRI BIN MOHD YATIM", "DDA", 10),
    ("51", "2025-12-29", "SHAMSIAH BINTI MAT ZAIN", "DDA", 10),
    ("52", "2025-12-29", "MOHD BASRI BIN MOHD YATIM", "DDA", 10),
];

fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap_or_default()
}

fn parse_seed_date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, crate::validation::DATE_FORMAT).unwrap_or_default()
}

/// The seed client files, each with its approved professional fee.
pub fn clients() -> Vec<Client> {
    CLIENTS
        .iter()
        .map(|&(id, name, detail, fee)| Client {
            id: id.to_string(),
            name: name.to_string(),
            detail: detail.to_string(),
            ledger: vec![LedgerEntry {
                date: date(CLIENT_SEED_DATE),
                desc: FEE_DESCRIPTION.to_string(),
                amt: Money::from_ringgit(fee),
            }],
        })
        .collect()
}

/// The seed notarization log, in stored order.
pub fn pjs_records() -> Vec<PjsRecord> {
    PJS_RECORDS
        .iter()
        .map(|&(id, date, name, detail, amount)| PjsRecord {
            id: id.to_string(),
            date: parse_seed_date(date),
            name: name.to_string(),
            detail: detail.to_string(),
            amount: Money::from_ringgit(amount),
        })
        .collect()
}
