use std::fs;

use clap::Parser;
use tempfile::TempDir;
use tweetvec::cli::args::TweetvecArgs;
use tweetvec::cli::commands::execute_command;

const TWEETS: &str = "\
,text,favorited,created,retweetCount,label
0,Crooked Hillary is a sad joke!,False,2016-10-26 20:02:23,8922,1
1,@user Thank you Ohio! #MAGA,False,2016-10-27 02:10:00,120,0
2,So sad. Rigged!,True,2016-11-01 13:00:00,45,1
3,I think it is a great day.,False,2016-11-02 08:30:00,7,0
";

fn write_fixtures(dir: &TempDir) {
    fs::write(dir.path().join("tweets.csv"), TWEETS).unwrap();
    fs::write(dir.path().join("vader.txt"), "great\t3.1\nsad\t-2.1\n").unwrap();
    fs::write(dir.path().join("nrc.txt"), "sad\tsadness\t1\ngreat\tjoy\t1\n").unwrap();
}

fn args(dir: &TempDir, command: &[&str]) -> TweetvecArgs {
    let sentiment = dir.path().join("vader.txt");
    let emotion = dir.path().join("nrc.txt");

    let mut argv = vec![
        "tweetvec".to_string(),
        "-q".to_string(),
        "--sentiment-lexicon".to_string(),
        sentiment.display().to_string(),
        "--emotion-lexicon".to_string(),
        emotion.display().to_string(),
    ];
    argv.extend(command.iter().map(|s| s.to_string()));
    TweetvecArgs::parse_from(argv)
}

#[test]
fn test_vectorize_writes_matrix_csv() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let input = dir.path().join("tweets.csv");
    let output = dir.path().join("matrix.csv");

    execute_command(args(
        &dir,
        &[
            "vectorize",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--keep-labels",
        ],
    ))
    .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header.last(), Some(&"label"));
    assert!(header.contains(&"retweetCount"));
    assert!(!header.contains(&"text"));
    assert!(lines[1].ends_with(",1"));
    assert!(lines[2].ends_with(",0"));
}

#[test]
fn test_train_reports_error_rates() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let input = dir.path().join("tweets.csv");

    let result = execute_command(args(
        &dir,
        &[
            "-f",
            "json",
            "train",
            input.to_str().unwrap(),
            "--test-fraction",
            "0.5",
            "--seed",
            "7",
        ],
    ));
    assert!(result.is_ok());
}

#[test]
fn test_features_for_one_tweet() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);

    let result = execute_command(args(
        &dir,
        &["features", "Sad!", "--created", "2016-11-08 13:00:00"],
    ));
    assert!(result.is_ok());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let output = dir.path().join("matrix.csv");

    let result = execute_command(args(
        &dir,
        &[
            "vectorize",
            "/nonexistent/tweets.csv",
            "-o",
            output.to_str().unwrap(),
        ],
    ));
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_non_ascii_delimiter_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let input = dir.path().join("tweets.csv");
    let output = dir.path().join("matrix.csv");

    let result = execute_command(args(
        &dir,
        &[
            "vectorize",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-d",
            "é",
        ],
    ));
    assert!(result.is_err());
    assert!(!output.exists());
}
