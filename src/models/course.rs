//! 课程目录
//!
//! 课程下拉框和请求构建共用的只读查找表 `identifier → label`

use std::collections::BTreeMap;

use phf::phf_map;

/// 下拉框占位项
pub const PLACEHOLDER_LABEL: &str = "Select a course...";

/// 内置课程表
static BUILTIN_COURSES: phf::Map<&'static str, &'static str> = phf_map! {
    "12345" => "12345",
    "course-101" => "Course 101",
    "CS 3780" => "CS 3780 Introduction to Machine Learning",
    "CS 3780 COMBINED-COMEET Introduction to Machine Learning (2024FA)" =>
        "CS 3780 COMBINED-COMEET Introduction to Machine Learning (2024FA)",
    "CS 4820" => "CS 4820 Introduction to Analysis of Algorithms",
    "CS 2110" => "CS 2110 Object-Oriented Programming and Data Structures",
};

/// 下拉框选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOption {
    /// 提交时使用的课程标识，占位项为空字符串
    pub identifier: String,
    /// 展示文本
    pub label: String,
}

/// 课程目录
#[derive(Debug, Clone)]
pub enum CourseCatalog {
    /// 内置静态表
    Builtin(&'static phf::Map<&'static str, &'static str>),
    /// 外部注入的表
    Custom(BTreeMap<String, String>),
}

impl Default for CourseCatalog {
    fn default() -> Self {
        CourseCatalog::Builtin(&BUILTIN_COURSES)
    }
}

impl CourseCatalog {
    /// 使用外部提供的条目创建目录
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CourseCatalog::Custom(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// 查找课程展示名
    pub fn label(&self, identifier: &str) -> Option<&str> {
        match self {
            CourseCatalog::Builtin(map) => map.get(identifier).copied(),
            CourseCatalog::Custom(map) => map.get(identifier).map(String::as_str),
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.label(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        match self {
            CourseCatalog::Builtin(map) => map.len(),
            CourseCatalog::Custom(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 下拉框选项：占位项在前，其余按标识排序
    pub fn options(&self) -> Vec<CourseOption> {
        let mut entries: Vec<(String, String)> = match self {
            CourseCatalog::Builtin(map) => map
                .entries()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            CourseCatalog::Custom(map) => {
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }
        };
        // phf 的迭代顺序不稳定
        entries.sort();

        let mut options = Vec::with_capacity(entries.len() + 1);
        options.push(CourseOption {
            identifier: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        });
        options.extend(
            entries
                .into_iter()
                .map(|(identifier, label)| CourseOption { identifier, label }),
        );
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = CourseCatalog::default();
        assert!(catalog.contains("12345"));
        assert_eq!(
            catalog.label("CS 3780"),
            Some("CS 3780 Introduction to Machine Learning")
        );
        assert!(catalog.label("MATH 1920").is_none());
    }

    #[test]
    fn test_options_placeholder_first() {
        let catalog = CourseCatalog::default();
        let options = catalog.options();
        assert_eq!(options.len(), catalog.len() + 1);
        assert_eq!(options[0].identifier, "");
        assert_eq!(options[0].label, "Select a course...");

        let ids: Vec<&str> = options[1..].iter().map(|o| o.identifier.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = CourseCatalog::from_entries([("PHYS 1112", "Physics I")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.label("PHYS 1112"), Some("Physics I"));
        assert!(!catalog.contains("12345"));
        assert_eq!(catalog.options()[1].label, "Physics I");
    }
}
