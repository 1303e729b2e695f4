use serde::Serialize;

/// Pages shown on either side of the current one
const WINDOW: u32 = 2;

/// One slot of the windowed page list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(u32),
    Ellipsis,
}

/// Pages to display for `current` out of `total`.
///
/// Page 1, the last page and pages within two of the current page are shown. The
/// page just outside the window on each side is replaced by a single ellipsis.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageEntry> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut entries = Vec::new();
    for i in 1..=total {
        if i == 1 || i == total || i.abs_diff(current) <= WINDOW {
            entries.push(PageEntry::Page(i));
        } else if i.abs_diff(current) == WINDOW + 1 {
            entries.push(PageEntry::Ellipsis);
        }
    }
    entries
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerLink {
    pub href: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PagerItem {
    Page {
        number: u32,
        href: String,
        active: bool,
    },
    Ellipsis,
}

/// Pager controls ready for the `partials/pager.html` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub previous: PagerLink,
    pub items: Vec<PagerItem>,
    pub next: PagerLink,
}

/// Build pager controls; `None` when there is at most one page.
///
/// `link` maps a page number to the href that selects it.
pub fn render_pager<L>(current: u32, total: u32, link: L) -> Option<Pager>
where
    L: Fn(u32) -> String,
{
    if total <= 1 {
        return None;
    }
    let current = current.clamp(1, total);

    let items = visible_pages(current, total)
        .into_iter()
        .map(|entry| match entry {
            PageEntry::Page(number) => PagerItem::Page {
                number,
                href: link(number),
                active: number == current,
            },
            PageEntry::Ellipsis => PagerItem::Ellipsis,
        })
        .collect();

    Some(Pager {
        previous: PagerLink {
            href: link(current.saturating_sub(1).max(1)),
            disabled: current == 1,
        },
        items,
        next: PagerLink {
            href: link((current + 1).min(total)),
            disabled: current == total,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageEntry::{Ellipsis, Page};

    #[test]
    fn test_window_around_middle_page() {
        assert_eq!(
            visible_pages(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_first_page() {
        assert_eq!(
            visible_pages(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_small_totals_have_no_ellipsis() {
        assert_eq!(
            visible_pages(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert!(render_pager(1, 1, |p| p.to_string()).is_none());
        assert!(render_pager(1, 0, |p| p.to_string()).is_none());
    }

    #[test]
    fn test_prev_next_state() {
        let pager = render_pager(1, 3, |p| format!("?page={}", p)).unwrap();
        assert!(pager.previous.disabled);
        assert!(!pager.next.disabled);
        assert_eq!(pager.next.href, "?page=2");

        let pager = render_pager(3, 3, |p| format!("?page={}", p)).unwrap();
        assert!(!pager.previous.disabled);
        assert!(pager.next.disabled);
        assert_eq!(pager.previous.href, "?page=2");
    }

    #[test]
    fn test_active_page_marked() {
        let pager = render_pager(2, 4, |p| format!("?page={}", p)).unwrap();
        let active: Vec<u32> = pager
            .items
            .iter()
            .filter_map(|item| match item {
                PagerItem::Page {
                    number,
                    active: true,
                    ..
                } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(active, vec![2]);
    }
}
