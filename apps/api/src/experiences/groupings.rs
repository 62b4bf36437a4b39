//! Tool and industry groupings derived from the experience list, displayed in
//! the admin-chosen order (see [`crate::ordering::apply_order`]).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::experiences::embedded::parse_tools;
use crate::models::experience::Experience;
use crate::ordering::apply_order;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRef {
    pub experience_id: i32,
    pub job_title: String,
    pub company: String,
    /// How the tool was used in this role. Empty for industry groupings.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    pub name: String,
    pub experiences: Vec<ExperienceRef>,
}

pub fn group_by_tool(experiences: &[Experience], tools_order: &[String]) -> Vec<Grouping> {
    let mut groups: BTreeMap<String, Vec<ExperienceRef>> = BTreeMap::new();
    for exp in experiences {
        for tool in parse_tools(&exp.tools) {
            let entry = groups.entry(tool.name).or_default();
            // A tool listed twice on one role still counts once.
            if entry.iter().any(|r| r.experience_id == exp.id) {
                continue;
            }
            entry.push(ExperienceRef {
                experience_id: exp.id,
                job_title: exp.job_title.clone(),
                company: exp.company.clone(),
                usage: tool.usage,
            });
        }
    }
    into_ordered(groups, tools_order)
}

pub fn group_by_industry(experiences: &[Experience], industries_order: &[String]) -> Vec<Grouping> {
    let mut groups: BTreeMap<String, Vec<ExperienceRef>> = BTreeMap::new();
    for exp in experiences {
        let industry = exp.industry.trim();
        if industry.is_empty() {
            continue;
        }
        groups
            .entry(industry.to_string())
            .or_default()
            .push(ExperienceRef {
                experience_id: exp.id,
                job_title: exp.job_title.clone(),
                company: exp.company.clone(),
                usage: String::new(),
            });
    }
    into_ordered(groups, industries_order)
}

fn into_ordered(mut groups: BTreeMap<String, Vec<ExperienceRef>>, order: &[String]) -> Vec<Grouping> {
    let present: Vec<String> = groups.keys().cloned().collect();
    apply_order(order, &present)
        .into_iter()
        .filter_map(|name| {
            groups
                .remove(&name)
                .map(|experiences| Grouping { name, experiences })
        })
        .collect()
}
