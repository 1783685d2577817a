use crate::hover::HoverRegistry;
use crate::page::Page;
use crate::record::PlayerRecord;
use crate::view::{columns_for, table_rows, team_cards, PlayerCard, TableRow};

/// The element a page renders its players into: the card grid or a table
/// body. `Node` is the host's handle for an appended row or card.
pub trait PlayerContainer {
    type Node: PartialEq;
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn append_row(&mut self, row: &TableRow) -> Result<Self::Node, Self::Error>;
    fn append_card(&mut self, card: &PlayerCard) -> Result<Self::Node, Self::Error>;
}

/// Replaces the container's content with `records`, in API order, and
/// registers every appended row or card for the hover popup. Returns how
/// many were appended.
pub fn fill_container<C: PlayerContainer>(
    container: &mut C,
    page: &Page,
    records: &[PlayerRecord],
    registry: &mut HoverRegistry<C::Node>,
) -> Result<usize, C::Error> {
    container.clear()?;
    registry.clear();

    match columns_for(page) {
        Some(columns) => {
            for row in table_rows(columns, records) {
                let node = container.append_row(&row)?;
                registry.register(node, row.player_name);
            }
        }
        None => {
            for card in team_cards(records) {
                let node = container.append_card(&card)?;
                registry.register(node, card.name);
            }
        }
    }

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::{fill_container, PlayerContainer};
    use crate::hover::HoverRegistry;
    use crate::page::Page;
    use crate::record::PlayerRecord;
    use crate::view::{PlayerCard, TableRow};

    /// Container that keeps its children as text and hands out increasing
    /// ids, like a DOM that never reuses nodes.
    #[derive(Default)]
    struct Children {
        items: Vec<String>,
        next_id: u32,
    }

    impl PlayerContainer for Children {
        type Node = u32;
        type Error = Infallible;

        fn clear(&mut self) -> Result<(), Infallible> {
            self.items.clear();
            Ok(())
        }

        fn append_row(&mut self, row: &TableRow) -> Result<u32, Infallible> {
            self.items.push(row.cells.join("|"));
            self.next_id += 1;
            Ok(self.next_id)
        }

        fn append_card(&mut self, card: &PlayerCard) -> Result<u32, Infallible> {
            self.items.push(format!("card:{}", card.name));
            self.next_id += 1;
            Ok(self.next_id)
        }
    }

    fn players() -> Vec<PlayerRecord> {
        ["Jos Buttler", "Phil Salt", "Adil Rashid"]
            .into_iter()
            .map(|name| PlayerRecord {
                name: name.to_string(),
                team: "England".to_string(),
                ..PlayerRecord::default()
            })
            .collect()
    }

    #[test]
    fn rendering_twice_does_not_duplicate_rows() {
        let page = Page::category("power".to_string());
        let mut container = Children::default();
        let mut registry = HoverRegistry::default();

        fill_container(&mut container, &page, &players(), &mut registry).unwrap();
        let first = container.items.clone();
        let count = fill_container(&mut container, &page, &players(), &mut registry).unwrap();

        assert_eq!(count, 3);
        assert_eq!(container.items, first);
        assert_eq!(container.items.len(), 3);
        assert_eq!(registry.len(), 3);
        // only the second render's nodes stay registered
        assert_eq!(registry.resolve(&1), None);
        assert_eq!(registry.resolve(&4), Some("Jos Buttler"));
    }

    #[test]
    fn team_cards_are_registered_in_api_order() {
        let page = Page::from_context(Some("England"), None).unwrap();
        let mut container = Children::default();
        let mut registry = HoverRegistry::default();

        fill_container(&mut container, &page, &players(), &mut registry).unwrap();

        assert_eq!(
            container.items,
            ["card:Jos Buttler", "card:Phil Salt", "card:Adil Rashid"]
        );
        assert_eq!(registry.resolve(&2), Some("Phil Salt"));
        assert_eq!(registry.resolve_path(&[9, 3]), Some((&3, "Adil Rashid")));
    }

    #[test]
    fn empty_payload_clears_previous_content() {
        let page = Page::category("fast".to_string());
        let mut container = Children::default();
        let mut registry = HoverRegistry::default();

        fill_container(&mut container, &page, &players(), &mut registry).unwrap();
        fill_container(&mut container, &page, &[], &mut registry).unwrap();

        assert!(container.items.is_empty());
        assert!(registry.is_empty());
    }
}
