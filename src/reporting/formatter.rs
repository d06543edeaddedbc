use super::aggregator::ResolutionGroups;

pub const NO_BUGS_CLOSED: &str = "*No bugs closed in last 24h* :-(\n";

const SHOW_BUG_URL: &str = "https://bugzilla.redhat.com/show_bug.cgi?id=";

/// "1 bug" / "3 bugs", or "1 Bug" / "3 Bugs" when `capital`.
pub fn bug_count_plural(count: usize, capital: bool) -> String {
    let noun = if capital { "Bug" } else { "bug" };
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Slack link showing `#<id>` and pointing at the bug page.
pub fn bug_link(id: u64) -> String {
    format!("<{}{}|#{}>", SHOW_BUG_URL, id, id)
}

/// One digest line for a resolution group, links in the given order.
pub fn format_group_line(resolution: &str, ids: &[u64]) -> String {
    let links: Vec<String> = ids.iter().map(|id| bug_link(*id)).collect();
    format!(
        "> {} closed as _{}_ ({})",
        bug_count_plural(ids.len(), false),
        resolution,
        links.join(",")
    )
}

/// Render the final report. Groups come out in lexicographic order of their
/// resolution label; the text depends on nothing but `groups`.
pub fn format_report(groups: &ResolutionGroups) -> String {
    if groups.total() == 0 {
        return NO_BUGS_CLOSED.to_string();
    }

    let lines: Vec<&str> = groups
        .iter()
        .flat_map(|(_, lines)| lines.iter().map(String::as_str))
        .collect();

    format!(
        "*{} Closed in the last 24h*:\n{}\n",
        bug_count_plural(groups.total(), true),
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_forms() {
        assert_eq!(bug_count_plural(1, false), "1 bug");
        assert_eq!(bug_count_plural(2, false), "2 bugs");
        assert_eq!(bug_count_plural(0, false), "0 bugs");
        assert_eq!(bug_count_plural(1, true), "1 Bug");
        assert_eq!(bug_count_plural(12, true), "12 Bugs");
    }

    #[test]
    fn test_bug_link() {
        assert_eq!(bug_link(1850123), "<https://bugzilla.redhat.com/show_bug.cgi?id=1850123|#1850123>");
    }

    #[test]
    fn test_group_line_single() {
        assert_eq!(
            format_group_line("NOTABUG", &[5]),
            "> 1 bug closed as _NOTABUG_ (<https://bugzilla.redhat.com/show_bug.cgi?id=5|#5>)"
        );
    }

    #[test]
    fn test_group_line_keeps_order_without_spaces() {
        let line = format_group_line("FIXED", &[9, 3]);
        assert!(line.starts_with("> 2 bugs closed as _FIXED_ ("));
        assert!(line.contains("|#9>,<https://"));
        assert!(line.find("#9>").unwrap() < line.find("#3>").unwrap());
    }

    #[test]
    fn test_empty_groups_render_sentinel() {
        assert_eq!(format_report(&ResolutionGroups::default()), NO_BUGS_CLOSED);
    }
}
