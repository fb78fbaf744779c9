use super::*;

#[test]
fn plan_updated_message_uses_display_name() {
    assert_eq!(plan_updated_message(PlanTier::Pro), "プロプランに更新しました！");
    assert_eq!(plan_updated_message(PlanTier::Free), "フリープランに更新しました！");
}

#[test]
fn failure_message_is_japanese() {
    assert!(plan_change_failed_message().contains("失敗"));
}
