//! Built-in board definitions and demo cards.

use crate::domain::{
    board::{BoardConfig, BoardType},
    card::{Card, CardId, CardStatus},
    stage::{Stage, StageSet},
    task::{Task, TaskType},
};
use chrono::NaiveDate;

fn stages(defs: &[(&str, &str, &str)]) -> StageSet {
    defs.iter()
        .map(|(key, color, icon)| Stage::new(*key, *color, *icon))
        .collect()
}

fn day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn pipeline(board_type: BoardType) -> BoardConfig<Card> {
    match board_type {
        BoardType::Lo => BoardConfig::new(
            "Loan Application Pipeline",
            stages(&[
                ("New Lead", "teal", "🟢"),
                ("Contacted", "gray", "📞"),
                ("Application Started", "blue", "📝"),
                ("Pre-Approved", "red", "✅"),
                ("In Underwriting", "orange", "🔍"),
                ("Closed", "green", "🏁"),
            ]),
        )
        .with_seed(loan_cards()),
        BoardType::ClosedClient => BoardConfig::new(
            "Closed Client Management Pipeline",
            stages(&[
                ("Just Closed", "teal", "🎉"),
                ("30-Day Review", "blue", "📆"),
                ("Refi Opportunity Identified", "yellow", "💡"),
                ("Annual Review", "purple", "📅"),
                ("Event Campaign", "pink", "🎈"),
                ("Dormant / Watchlist", "gray", "🕰️"),
            ]),
        ),
        BoardType::Loa => BoardConfig::new(
            "LOA File Processing Pipeline",
            stages(&[
                ("App Received", "teal", "📥"),
                ("Pre-Approval Issued", "blue", "✅"),
                ("In Processing", "orange", "🔄"),
                ("Submitted to UW", "purple", "📤"),
                ("Conditional Approval", "yellow", "📝"),
                ("CTC", "green", "✔️"),
                ("Docs Out / Scheduled", "pink", "📄"),
                ("Funded", "cyan", "💰"),
                ("Post-Close Follow-Up", "gray", "🔚"),
            ]),
        ),
        BoardType::Cem => BoardConfig::new(
            "Production Partner Prospect Pipeline",
            stages(&[
                ("Clicked Ad", "teal", "🖱️"),
                ("Landing Page Viewed", "blue", "🌐"),
                ("Form Submitted", "orange", "📝"),
                ("Qualified Lead", "green", "✅"),
                ("Booked Appointment", "purple", "📅"),
                ("Engaged / Assigned", "pink", "🤝"),
            ]),
        ),
    }
}

fn loan_cards() -> Vec<Card> {
    use CardStatus::{Delayed, OnTrack, Stalled};

    let rows = [
        ("1", "Alice Smith", "123 Main St", "Conventional", "New Lead", 2, OnTrack, "LO-001"),
        ("2", "Bob Johnson", "456 Oak Ave", "FHA", "Contacted", 5, Delayed, "LO-002"),
        ("3", "Carol Lee", "789 Pine Rd", "VA", "Application Started", 1, OnTrack, "LO-003"),
        ("4", "David Kim", "321 Maple Dr", "Jumbo", "Pre-Approved", 8, Stalled, "LO-004"),
        ("5", "Eva Green", "654 Cedar Ln", "Conventional", "In Underwriting", 3, OnTrack, "LO-005"),
        ("6", "Frank Moore", "987 Birch Blvd", "FHA", "Closed", 0, OnTrack, "LO-006"),
    ];

    rows.into_iter()
        .map(|(id, borrower, address, loan_type, stage, days, status, number)| {
            Card::new(CardId::new(id), borrower, stage)
                .with_loan(number, loan_type, address)
                .with_status(status)
                .with_time_in_stage(days)
        })
        .collect()
}

pub(crate) fn task_board() -> BoardConfig<Task> {
    BoardConfig::new(
        "Tasks",
        stages(&[
            ("Application", "teal", "📝"),
            ("Processing", "orange", "🔄"),
            ("Underwriting", "purple", "🔍"),
            ("Closing", "green", "🏁"),
            ("Post-Close", "gray", "📬"),
        ]),
    )
    .with_seed(tasks())
}

fn tasks() -> Vec<Task> {
    use TaskType::{Call, Compliance, DocCollection, Email, FollowUp, Marketing};

    let rows = [
        ("t1", "Call Alice Smith about rate lock", Call, "Application"),
        ("t2", "Collect paystubs from Bob Johnson", DocCollection, "Processing"),
        ("t3", "Email appraisal update to Carol Lee", Email, "Underwriting"),
        ("t4", "Confirm closing date with title", FollowUp, "Closing"),
        ("t5", "Review TRID disclosures", Compliance, "Closing"),
        ("t6", "Send anniversary mailer", Marketing, "Post-Close"),
    ];
    let mut tasks: Vec<Task> = rows
        .into_iter()
        .map(|(id, title, kind, stage)| Task::new(CardId::new(id), title, kind, stage))
        .collect();

    let details: [(&str, Option<NaiveDate>, &[&str]); 6] = [
        ("Team Member 1", day(2025, 6, 2), &["rate-lock", "hot"]),
        ("Team Member 2", day(2025, 6, 3), &["docs"]),
        ("Team Member 1", day(2025, 6, 3), &[]),
        ("Team Member 2", day(2025, 6, 5), &["closing"]),
        ("Team Member 1", day(2025, 6, 5), &["compliance", "closing"]),
        ("Team Member 2", None, &["marketing"]),
    ];

    for (task, (assignee, due, tags)) in tasks.iter_mut().zip(details) {
        task.assignee = Some(assignee.to_string());
        task.due_date = due;
        for tag in tags {
            task.add_tag(*tag);
        }
    }
    tasks
}
