// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造传道员、历史记录、原始部分等测试数据
// ==========================================
#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use meeting_scheduler::calendar::WeekContext;
use meeting_scheduler::domain::publisher::{Availability, Privileges, Publisher, SectionEligibility};
use meeting_scheduler::domain::{Participation, SchedulePart};
use meeting_scheduler::domain::types::{AgeGroup, Condition, Gender, PartType};

/// 创建测试用传道员(在职、已受浸、成年)
pub fn create_publisher(id: &str, name: &str, gender: Gender, condition: Condition) -> Publisher {
    Publisher {
        id: id.to_string(),
        name: name.to_string(),
        gender,
        condition,
        phone: None,
        is_baptized: true,
        is_serving: true,
        age_group: AgeGroup::Adult,
        parent_ids: vec![],
        is_helper_only: false,
        can_pair_with_non_parent: false,
        privileges: Privileges::default(),
        privileges_by_section: SectionEligibility::default(),
        availability: Availability::default(),
        aliases: vec![],
    }
}

/// 具备全部特权的长老
pub fn create_elder(id: &str, name: &str) -> Publisher {
    let mut elder = create_publisher(id, name, Gender::Brother, Condition::Elder);
    elder.privileges = Privileges {
        can_give_talks: true,
        can_conduct_study: true,
        can_read_study: true,
        can_pray: true,
        can_preside: true,
    };
    elder
}

/// 一个小会众: 3 位长老、2 位弟兄、3 位姊妹
pub fn create_congregation() -> Vec<Publisher> {
    let mut ms = create_publisher("ms1", "Marcos Reis", Gender::Brother, Condition::MinisterialServant);
    ms.privileges.can_give_talks = true;
    ms.privileges.can_read_study = true;
    ms.privileges.can_pray = true;

    vec![
        create_elder("e1", "Antônio Alves"),
        create_elder("e2", "Bernardo Costa"),
        create_elder("e3", "Carlos Dias"),
        ms,
        create_publisher("b1", "Daniel Lima", Gender::Brother, Condition::Publisher),
        create_publisher("s1", "Eva Martins", Gender::Sister, Condition::Publisher),
        create_publisher("s2", "Fabiana Nunes", Gender::Sister, Condition::Publisher),
        create_publisher("s3", "Gabriela Souza", Gender::Sister, Condition::Publisher),
    ]
}

/// 2025-11-03 这一周(奇数年,周三聚会)
pub fn create_week() -> WeekContext {
    WeekContext::new("2025-11-03", NaiveDate::from_ymd_opt(2025, 11, 5).unwrap())
}

/// 创建历史记录
pub fn create_participation(name: &str, part_type: PartType, title: &str, ymd: (i32, u32, u32)) -> Participation {
    let (y, m, d) = ymd;
    Participation {
        id: format!("{}-{}-{}-{}", name, y, m, d),
        publisher_name: name.to_string(),
        week: format!("{:04}-{:02}-{:02}", y, m, d),
        date: Utc.with_ymd_and_hms(y, m, d, 19, 30, 0).unwrap(),
        part_title: title.to_string(),
        part_type,
        duration: None,
    }
}

/// 一周的原始部分(接入结果形态: 无独立助手行,含诗歌)
pub fn create_raw_week() -> Vec<SchedulePart> {
    vec![
        SchedulePart::new("Cântico 76", PartType::Song, 3),
        SchedulePart::new("Comentários Iniciais", PartType::PresidingOfficer, 1).presided(),
        SchedulePart::new("1. Jeová é nosso refúgio", PartType::Treasures, 10),
        SchedulePart::new("2. Joias espirituais", PartType::Treasures, 10),
        SchedulePart::new("3. Leitura da Bíblia", PartType::Treasures, 4),
        SchedulePart::new("4. Iniciando conversas", PartType::Ministry, 3).with_helper(),
        SchedulePart::new("5. Cultivando o interesse", PartType::Ministry, 4).with_helper(),
        SchedulePart::new("6. Discurso", PartType::Ministry, 5),
        SchedulePart::new("7. Necessidades locais", PartType::ChristianLife, 15),
        SchedulePart::new("8. Estudo bíblico de congregação", PartType::StudyConductor, 30),
        SchedulePart::new("Comentários Finais", PartType::ClosingComments, 3).presided(),
        SchedulePart::new("Oração Final", PartType::ClosingPrayer, 1),
    ]
}
