use std::collections::HashMap;

use crate::domain::card::Card;
use crate::domain::{SeatIndex, TableId};
use crate::engine::hand_history::HandEventKind;
use crate::engine::TableManager;

use super::dto::TableView;
use super::errors::ApiError;

/// Снимок стола для зрителя на месте `viewer` (или наблюдателя).
///
/// Пока новая раздача не началась, видны карты, вскрытые на прошлом шоудауне.
pub fn table_view(
    manager: &TableManager,
    table_id: TableId,
    viewer: Option<SeatIndex>,
) -> Result<TableView, ApiError> {
    let table = manager
        .table(table_id)
        .ok_or(ApiError::TableNotFound(table_id))?;

    let revealed = if table.hand_in_progress {
        HashMap::new()
    } else {
        revealed_cards(manager, table_id)
    };

    Ok(TableView::build(
        table,
        manager.hand_engine(table_id),
        viewer,
        &revealed,
    ))
}

/// Карты, открытые на шоудауне последней раздачи.
fn revealed_cards(manager: &TableManager, table_id: TableId) -> HashMap<SeatIndex, Vec<Card>> {
    manager
        .last_history(table_id)
        .map(|history| {
            history
                .kinds()
                .filter_map(|kind| match kind {
                    HandEventKind::ShowdownReveal {
                        seat, hole_cards, ..
                    } => Some((*seat, hole_cards.clone())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
