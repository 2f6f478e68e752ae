use serde::{Deserialize, Serialize};

/// 公开列表的查询参数
///
/// `page` 保持字符串形式接收，非数字时回退到第一页，而不是返回 400。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    /// 对正文的子串搜索
    pub s: Option<String>,
}

impl PageQuery {
    pub fn search(&self) -> Option<&str> {
        self.s
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 解析页码：非数字或小于 1 时为第 1 页，超出末页时为末页
pub fn resolve_page(raw: Option<&str>, total_pages: u64) -> u64 {
    let requested = raw
        .and_then(|p| p.trim().parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);
    requested.min(total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_page_non_numeric() {
        assert_eq!(resolve_page(Some("abc"), 5), 1);
        assert_eq!(resolve_page(None, 5), 1);
        assert_eq!(resolve_page(Some("0"), 5), 1);
        assert_eq!(resolve_page(Some("-3"), 5), 1);
    }

    #[test]
    fn test_resolve_page_beyond_last() {
        assert_eq!(resolve_page(Some("99"), 3), 3);
        assert_eq!(resolve_page(Some("2"), 3), 2);
        assert_eq!(resolve_page(Some("4"), 0), 1);
    }

    #[test]
    fn test_search_trims_empty() {
        let q = PageQuery {
            page: None,
            s: Some("   ".to_string()),
        };
        assert_eq!(q.search(), None);
        let q = PageQuery {
            page: None,
            s: Some(" rust ".to_string()),
        };
        assert_eq!(q.search(), Some("rust"));
    }
}
