use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 人员类型（教授与学生共用一张表）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "person.ts")]
pub enum PersonKind {
    Professor,
    Student,
}

impl PersonKind {
    pub const PROFESSOR: &'static str = "professor";
    pub const STUDENT: &'static str = "student";
}

impl std::fmt::Display for PersonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonKind::Professor => write!(f, "{}", PersonKind::PROFESSOR),
            PersonKind::Student => write!(f, "{}", PersonKind::STUDENT),
        }
    }
}

impl std::str::FromStr for PersonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professor" => Ok(PersonKind::Professor),
            "student" => Ok(PersonKind::Student),
            _ => Err(format!("Invalid person kind: {s}")),
        }
    }
}

// 专业
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "person.ts")]
pub enum Career {
    Fisica,
    Quimica,
    Contaduria,
}

impl<'de> Deserialize<'de> for Career {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Career>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的专业: '{s}'. 支持的专业: fisica, quimica, contaduria"
            ))
        })
    }
}

impl std::fmt::Display for Career {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Career::Fisica => write!(f, "fisica"),
            Career::Quimica => write!(f, "quimica"),
            Career::Contaduria => write!(f, "contaduria"),
        }
    }
}

impl std::str::FromStr for Career {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 表格里的数字单元格可能被读成 "2.0"
        match s.trim().to_lowercase().trim_end_matches(".0") {
            "fisica" | "física" | "1" => Ok(Career::Fisica),
            "quimica" | "química" | "2" => Ok(Career::Quimica),
            "contaduria" | "contaduría" | "3" => Ok(Career::Contaduria),
            _ => Err(format!("Invalid career: {s}")),
        }
    }
}

/// 教授与学生共享的个人信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct PersonalData {
    pub full_name: String,
    pub ci: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub age: i32,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub residence: Option<String>,
    pub career: Career,
}

// 人员实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "person.ts")]
pub struct Person {
    pub id: i64,
    pub kind: PersonKind,
    #[serde(flatten)]
    #[ts(flatten)]
    pub data: PersonalData,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Person {
    pub fn is_professor(&self) -> bool {
        self.kind == PersonKind::Professor
    }

    pub fn is_student(&self) -> bool {
        self.kind == PersonKind::Student
    }
}
