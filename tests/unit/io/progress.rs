//! Tests for the assignment progress bar

#[cfg(test)]
mod tests {
    use greedymosaic::io::progress::AssignmentProgress;

    // Tests updates move the bar to the reported step
    // Verified by incrementing instead of setting the position
    #[test]
    fn test_progress_updates() {
        let progress = AssignmentProgress::new(10, "assigning");
        assert_eq!(progress.position(), 0);

        progress.update(3);
        progress.update(7);
        assert_eq!(progress.position(), 7);

        progress.finish();
    }

    // Tests an empty run can be created and finished
    // Verified by dividing by the total length
    #[test]
    fn test_empty_progress() {
        let progress = AssignmentProgress::new(0, "empty");
        progress.update(0);
        progress.finish();
        assert_eq!(progress.position(), 0);
    }
}
