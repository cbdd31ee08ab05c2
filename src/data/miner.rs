use super::aggregate::{split_tokens, Tally};
use super::model::{Posting, TextField};

/// How many combinations the skill analysis shows.
pub const TOP_COMBINATIONS: usize = 10;

/// An unordered group of three skills and how many postings list it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCombination {
    /// The three skills, sorted so equal sets compare equal.
    pub skills: [String; 3],
    pub count: usize,
}

impl SkillCombination {
    pub fn label(&self) -> String {
        self.skills.join(", ")
    }
}

/// Count every 3-skill combination across postings and return the `top_n`
/// most frequent.
///
/// Skills are trimmed but keep their case. Each token position is distinct,
/// so a skill listed twice in one posting can appear twice in a combination.
/// Postings with fewer than three skills contribute nothing.
pub fn top_skill_combinations<'a, I>(rows: I, top_n: usize) -> Vec<SkillCombination>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut tally = Tally::new();
    for p in rows {
        let Some(cell) = TextField::Skills.value(p) else {
            continue;
        };
        let tokens: Vec<&str> = split_tokens(cell).collect();
        for_each_triple(&tokens, |triple| tally.add(triple));
    }

    let out: Vec<SkillCombination> = tally
        .into_sorted()
        .into_iter()
        .take(top_n)
        .map(|([a, b, c], count)| SkillCombination {
            skills: [a.to_string(), b.to_string(), c.to_string()],
            count,
        })
        .collect();
    log::debug!("mined {} skill combinations", out.len());
    out
}

/// Call `f` with every 3-combination of positions in `tokens`, each sorted.
fn for_each_triple<'t, F>(tokens: &[&'t str], mut f: F)
where
    F: FnMut([&'t str; 3]),
{
    let n = tokens.len();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let mut triple = [tokens[i], tokens[j], tokens[k]];
                triple.sort_unstable();
                f(triple);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{posting, with};
    use crate::data::model::JobDataset;

    fn dataset(skills: &[&str]) -> JobDataset {
        JobDataset::from_raw(
            skills
                .iter()
                .enumerate()
                .map(|(i, s)| with(posting(&i.to_string()), TextField::Skills, s))
                .collect(),
        )
    }

    fn triples(tokens: &[&str]) -> Vec<[String; 3]> {
        let mut out = Vec::new();
        for_each_triple(tokens, |t| out.push(t.map(str::to_string)));
        out
    }

    #[test]
    fn four_skills_give_four_triples() {
        let got = triples(&["A", "B", "C", "D"]);
        let want: Vec<[String; 3]> = [
            ["A", "B", "C"],
            ["A", "B", "D"],
            ["A", "C", "D"],
            ["B", "C", "D"],
        ]
        .into_iter()
        .map(|t| t.map(str::to_string))
        .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn fewer_than_three_skills_contribute_nothing() {
        assert!(triples(&["A", "B"]).is_empty());
        let ds = dataset(&["Python, SQL", "Excel"]);
        assert!(top_skill_combinations(ds.postings(), TOP_COMBINATIONS).is_empty());
    }

    #[test]
    fn counts_unordered_and_case_sensitive() {
        let ds = dataset(&[
            "Python, SQL, Excel",
            "Excel,Python,SQL",
            "python, sql, excel",
            "Java, Spring, SQL, Docker",
        ]);
        let out = top_skill_combinations(ds.postings(), TOP_COMBINATIONS);
        assert_eq!(out[0].label(), "Excel, Python, SQL");
        assert_eq!(out[0].count, 2);
        assert_eq!(out[1].label(), "excel, python, sql");
        assert_eq!(out[1].count, 1);
        assert_eq!(out.len(), 1 + 1 + 4);
    }

    #[test]
    fn duplicate_tokens_make_degenerate_triples() {
        let got = triples(&["SQL", "Python", "SQL"]);
        assert_eq!(got, vec![["Python", "SQL", "SQL"].map(str::to_string)]);
    }

    #[test]
    fn keeps_only_top_n_with_stable_ties() {
        let ds = dataset(&["a,b,c", "d,e,f", "g,h,i", "d,e,f"]);
        let out = top_skill_combinations(ds.postings(), 2);
        let labels: Vec<String> = out.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["d, e, f", "a, b, c"]);
    }
}
