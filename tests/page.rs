// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use cucumber_page::writer::Page;

use self::common::source;

#[test]
fn rendering_is_repeatable() {
    let source = source("multiply.feature");

    let first = Page::render(&source).unwrap();
    let second = Page::render(&source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn renders_without_executing() {
    let html = Page::render(&source("multiply.feature")).unwrap();

    assert!(html.starts_with("<h3>Feature: Multiply</h3>"));
    assert!(html.contains(
        "<h4>Scenario: multiply once</h4>\
         Given a variable x with value 2<br/>\
         When I multiply x by 3<br/>\
         Then x should equal 6<br/>",
    ));
    assert!(html.contains(
        "<h4>Scenario Outline: multiply many</h4>\
         Given a variable x with value &lt;x&gt;<br/>",
    ));
    assert!(html.contains(
        "<h4>Examples</h4><table>\
         <tr><th>x</th><th>y</th><th>z</th></tr>\
         <tr><td>2</td><td>3</td><td>6</td></tr>\
         <tr><td>2</td><td>2</td><td>5</td></tr>\
         </table>",
    ));
    assert!(!html.contains("class='pass'"));
}

#[test]
fn escapes_markup_in_source() {
    let html = Page::render(
        "Feature: <b>bold</b> & \"quoted\"\n\
         \n  Scenario: it's\
         \n    Given a step with a docstring\
         \n      \"\"\"\
         \n      <script>alert(1)</script>\
         \n      \"\"\"\n",
    )
    .unwrap();

    assert!(html.starts_with(
        "<h3>Feature: &lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;</h3>",
    ));
    assert!(html.contains("<h4>Scenario: it&#39;s</h4>"));
    assert!(html.contains("Given a step with a docstring<br/><pre>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn renders_parse_errors_with_source() {
    let html = Page::render("Scenario: orphan\n  Given <nothing>\n").unwrap();

    assert!(html.starts_with("<span class='error'>Parse error in Cucumber page: "));
    assert!(html.ends_with(
        "</span><br/><br/>Scenario: orphan<br/>  Given &lt;nothing&gt;",
    ));
}
