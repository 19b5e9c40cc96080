use std::sync::LazyLock;

use crate::stage::StageData;

include!(concat!(env!("OUT_DIR"), "/stages.rs"));

static STAGES: LazyLock<Vec<StageData>> = LazyLock::new(|| {
    STAGE_DATA
        .iter()
        .filter_map(|(id, csv, json)| match StageData::parse(id, csv, json) {
            Ok(stage) => Some(stage),
            Err(e) => {
                log::error!("Skipping stage {}: {}", id, e);
                None
            }
        })
        .collect()
});

/// Every embedded stage that parsed, in play order.
pub(crate) fn all() -> &'static [StageData] {
    &STAGES
}

pub(crate) fn index_of(id: &str) -> Option<usize> {
    STAGES.iter().position(|s| s.id == id)
}
